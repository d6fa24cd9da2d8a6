pub mod crawler;
pub mod web;

pub use crawler::PageFetcher;

use crate::results::{DownloadSummary, LinkRecord};
use crate::utils::{is_nonempty_file, slugify_article_url};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::Path;

/// Download every linked article page into `problems_dir`.
///
/// Pages already saved as non-empty files are skipped, so the crawl can be
/// re-run after an interruption. Each page is attempted once.
pub async fn crawl_problem_pages<F: PageFetcher>(
    links: &[LinkRecord],
    problems_dir: &Path,
    fetcher: &F,
) -> DownloadSummary {
    let mut summary = DownloadSummary::default();

    let mut seen = HashSet::new();
    let unique: Vec<&LinkRecord> = links
        .iter()
        .filter(|link| seen.insert(link.url.as_str()))
        .collect();
    ::log::info!("Found {} unique problem links", unique.len());

    if let Err(e) = std::fs::create_dir_all(problems_dir) {
        ::log::error!("Failed to create {}: {}", problems_dir.display(), e);
        summary.failed = unique.len();
        return summary;
    }

    let progress = download_progress(unique.len());
    for link in unique {
        progress.inc(1);
        let file_name = match slugify_article_url(&link.url) {
            Ok(name) => name,
            Err(e) => {
                ::log::error!("Cannot derive a file name from {}: {}", link.url, e);
                summary.failed += 1;
                continue;
            }
        };
        let file_path = problems_dir.join(file_name);

        if is_nonempty_file(&file_path) {
            ::log::debug!("Already downloaded: {}", file_path.display());
            summary.skipped += 1;
            continue;
        }

        ::log::debug!("Downloading {}", link.url);
        if fetcher.download(&link.url, &file_path).await {
            summary.downloaded += 1;
        } else {
            summary.failed += 1;
        }
    }
    progress.finish();

    summary
}

/// Progress bar over the pages of one crawl
pub fn download_progress(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{msg}: {percent}%|{wide_bar}| {pos}/{len} [{elapsed_precise}]",
    ) {
        bar.set_style(style);
    }
    bar.set_message("Downloading problem pages");
    bar
}
