use crate::config::LinkExtractorConfig;
use crate::filter::LinkFilter;
use crate::parsers::{content_region, element_text, elements_named};
use crate::results::LinkRecord;
use scraper::Html;
use std::collections::HashSet;
use std::path::Path;

/// Extract links to individual problem articles from a saved list page.
///
/// Only the first `item_limit` list items of the content region are
/// examined. Links are deduplicated by URL, keeping the first one seen.
/// A page without the content region yields an empty list.
pub fn extract_problem_links(html: &str, config: &LinkExtractorConfig) -> Vec<LinkRecord> {
    let filter = match LinkFilter::new(config.filter.clone()) {
        Ok(filter) => filter,
        Err(e) => {
            ::log::error!("Invalid link keywords: {}", e);
            return Vec::new();
        }
    };

    let doc = Html::parse_document(html);
    let Some(region) = content_region(&doc, &config.content_id) else {
        ::log::warn!("Could not find main content area #{}", config.content_id);
        return Vec::new();
    };

    let items: Vec<_> = elements_named(region, "li").collect();
    ::log::info!("Examining {} list items", items.len());

    let mut links = Vec::new();
    let mut seen = HashSet::new();

    for item in items.into_iter().take(config.item_limit) {
        for anchor in elements_named(item, "a") {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let title = anchor.value().attr("title").unwrap_or_default();
            let text = element_text(anchor);

            if !filter.accepts(href, title, &text) {
                continue;
            }

            let Some(url) = filter.resolve(href) else {
                ::log::trace!("Skipping non-article href: {}", href);
                continue;
            };

            if seen.insert(url.clone()) {
                ::log::info!("Added link {}: {} - {}", links.len() + 1, url, text);
                links.push(LinkRecord::new(url, title.to_string(), text));
            }
        }
    }

    links
}

/// Read a saved page from disk and extract its problem links.
///
/// An unreadable file is logged and treated like a page without links.
pub fn extract_problem_links_from_file(
    path: &Path,
    config: &LinkExtractorConfig,
) -> Vec<LinkRecord> {
    match std::fs::read_to_string(path) {
        Ok(html) => extract_problem_links(&html, config),
        Err(e) => {
            ::log::error!("Failed to read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
