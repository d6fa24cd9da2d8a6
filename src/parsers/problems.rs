use crate::config::ProblemExtractorConfig;
use crate::parsers::{content_region, element_text, elements_named};
use crate::results::CategoryRecord;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

/// Category used for lists with no heading before them
pub const UNCATEGORIZED: &str = "Uncategorized";

const HEADINGS: [&str; 3] = ["h2", "h3", "h4"];

/// Extract categorized problem statements from a saved list page.
///
/// Every top-level `ul` of the content region contributes the text of its
/// items longer than `min_item_len` characters, filed under the nearest
/// heading before it in document order. Lists under skipped sections are
/// dropped and categories with equal names are merged.
pub fn extract_unsolved_problems(html: &str, config: &ProblemExtractorConfig) -> Vec<CategoryRecord> {
    let doc = Html::parse_document(html);
    let Some(region) = content_region(&doc, &config.content_id) else {
        ::log::warn!("Main content area #{} not found", config.content_id);
        return Vec::new();
    };

    let skip_sections: Vec<String> = config
        .skip_sections
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let mut sections = Vec::new();
    let mut list_count = 0;
    let mut last_heading: Option<ElementRef<'_>> = None;

    // Single pre-order pass: the last heading seen is the nearest one
    // preceding each list.
    for element in doc.root_element().descendants().filter_map(ElementRef::wrap) {
        let name = element.value().name();
        if HEADINGS.contains(&name) {
            last_heading = Some(element);
            continue;
        }
        if name != "ul" || !is_top_level_list(element, region) {
            continue;
        }
        list_count += 1;

        let items = collect_items(element, config.min_item_len);
        if items.is_empty() {
            continue;
        }

        let category = last_heading
            .map(element_text)
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        let lowered = category.to_lowercase();
        if skip_sections.iter().any(|skip| lowered.contains(skip.as_str())) {
            ::log::debug!("Skipping section '{}'", category);
            continue;
        }

        ::log::info!("Added category '{}' with {} problems", category, items.len());
        sections.push(CategoryRecord::new(category, items));
    }

    ::log::info!("Found {} lists", list_count);
    merge_categories(sections)
}

/// Merge records with the same category name, keeping first-seen order
pub fn merge_categories(records: Vec<CategoryRecord>) -> Vec<CategoryRecord> {
    let mut merged: Vec<CategoryRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        match positions.get(&record.category) {
            Some(&index) => merged[index].problems.extend(record.problems),
            None => {
                positions.insert(record.category.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

/// Serialize categories as pretty-printed UTF-8 JSON
pub fn write_problems_json(records: &[CategoryRecord], path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// True if `list` sits inside `region` without another `ul` in between
fn is_top_level_list(list: ElementRef<'_>, region: ElementRef<'_>) -> bool {
    for ancestor in list.ancestors().filter_map(ElementRef::wrap) {
        if ancestor.id() == region.id() {
            return true;
        }
        if ancestor.value().name() == "ul" {
            return false;
        }
    }
    false
}

fn collect_items(list: ElementRef<'_>, min_len: usize) -> Vec<String> {
    elements_named(list, "li")
        .map(element_text)
        .filter(|text| text.chars().count() > min_len)
        .collect()
}
