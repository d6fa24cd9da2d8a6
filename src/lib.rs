// Re-export modules
pub mod config;
pub mod crawlers;
pub mod dataset;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::HarvestConfig;
pub use results::{CategoryRecord, DownloadSummary, LinkRecord};

use crawlers::web::WebDriverFetcher;
use parsers::links::extract_problem_links_from_file;
use parsers::problems::{extract_unsolved_problems, write_problems_json};
use utils::truncate_chars;

/// Extract problem links from the saved list page and print them
pub fn run_link_extraction(config: &HarvestConfig) -> Vec<LinkRecord> {
    let links = extract_problem_links_from_file(&config.input_page, &config.links);
    println!("Found {} potential problem links", links.len());
    for link in &links {
        println!("- {} ({})", link.text, link.url);
    }
    links
}

/// Download every problem article linked from the saved list page
pub async fn run_page_crawl(config: &HarvestConfig) -> DownloadSummary {
    let links = extract_problem_links_from_file(&config.input_page, &config.links);
    println!("Found {} potential problem links", links.len());

    let fetcher = WebDriverFetcher::new(config.fetch.clone());
    let summary = crawlers::crawl_problem_pages(&links, &config.fetch.problems_dir, &fetcher).await;

    println!("\nDownload complete!");
    println!("Successfully downloaded: {} pages", summary.downloaded);
    println!("Skipped (already existed): {} pages", summary.skipped);
    println!("Errors: {} pages", summary.failed);
    summary
}

/// Extract categorized problems from the saved list page and write them as JSON
pub fn run_problem_extraction(config: &HarvestConfig) -> Vec<CategoryRecord> {
    if !config.input_page.exists() {
        println!("Wikipedia page not found!");
        return Vec::new();
    }

    ::log::info!("Using existing Wikipedia page {}", config.input_page.display());
    let html = match std::fs::read_to_string(&config.input_page) {
        Ok(html) => html,
        Err(e) => {
            ::log::error!("Failed to read {}: {}", config.input_page.display(), e);
            return Vec::new();
        }
    };

    let categories = extract_unsolved_problems(&html, &config.problems);

    let output = &config.problems.output_file;
    match write_problems_json(&categories, output) {
        Ok(()) => ::log::info!("Saved problems to {}", output.display()),
        Err(e) => ::log::error!("Failed to write {}: {}", output.display(), e),
    }

    print_summary(&categories);
    categories
}

/// Print category counts and the first few problems of each category
pub fn print_summary(categories: &[CategoryRecord]) {
    let total: usize = categories.iter().map(|c| c.problems.len()).sum();
    println!("\nExtracted {} categories of unsolved problems", categories.len());
    println!("Total problems extracted: {}", total);

    for category in categories {
        println!("- {}: {} problems", category.category, category.problems.len());
        for (i, problem) in category.problems.iter().take(3).enumerate() {
            println!("  {}. {}", i + 1, truncate_chars(problem, 60));
        }
        if category.problems.len() > 3 {
            println!("  ... and {} more", category.problems.len() - 3);
        }
    }
}
