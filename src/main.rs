use clap::Parser;
use unsolved_problems::HarvestConfig;
use unsolved_problems::dataset::run_sample_viewer;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging; diagnostics go to stdout next to the reports
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match HarvestConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::warn!(
                    "Failed to load config {}: {}; using defaults",
                    path.display(),
                    e
                );
                HarvestConfig::default()
            }
        },
        None => HarvestConfig::default(),
    };
    config.apply_env();

    let start_time = std::time::Instant::now();

    match args.command {
        Command::Links => {
            unsolved_problems::run_link_extraction(&config);
        }
        Command::Fetch => {
            println!("Note: page fetching requires a WebDriver server (e.g., ChromeDriver).");
            println!(
                "Set WEBDRIVER_URL environment variable if not using {}",
                config.fetch.webdriver_url
            );
            unsolved_problems::run_page_crawl(&config).await;
        }
        Command::Extract => {
            let categories = unsolved_problems::run_problem_extraction(&config);
            if !categories.is_empty() {
                println!(
                    "\nCrawling complete! Data saved to '{}'",
                    config.problems.output_file.display()
                );
            }
        }
        Command::Samples => run_sample_viewer(&config.dataset),
    }

    ::log::info!(
        "Finished {:?} in {:.2} seconds",
        args.command,
        start_time.elapsed().as_secs_f64()
    );
}
