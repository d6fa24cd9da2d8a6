use crate::filter::LinkFilterConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the link extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkExtractorConfig {
    /// `id` of the element holding the article body
    #[serde(default = "default_content_id")]
    pub content_id: String,

    /// Maximum number of list items examined in the content region
    #[serde(default = "default_item_limit")]
    pub item_limit: usize,

    /// Rules for accepting and resolving anchors
    #[serde(default)]
    pub filter: LinkFilterConfig,
}

/// Configuration for the headless page fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// User agent the browser presents
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Navigation timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Pause after a successful download, in seconds
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Pause after a failed download, in seconds
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,

    /// Directory the article pages are written to
    #[serde(default = "default_problems_dir")]
    pub problems_dir: PathBuf,
}

/// Configuration for the problem extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemExtractorConfig {
    /// `id` of the element holding the article body
    #[serde(default = "default_content_id")]
    pub content_id: String,

    /// Items must be strictly longer than this many characters
    #[serde(default = "default_min_item_len")]
    pub min_item_len: usize,

    /// Heading substrings whose lists are dropped (case-insensitive)
    #[serde(default = "default_skip_sections")]
    pub skip_sections: Vec<String>,

    /// Where the JSON output goes
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

/// Configuration for the dataset sample viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Parquet file with the training split
    #[serde(default = "default_train_path")]
    pub train_path: PathBuf,

    /// Parquet file with the validation split
    #[serde(default = "default_val_path")]
    pub val_path: PathBuf,

    /// Number of leading rows shown per split
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,

    /// Directory decoded images are written to
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
}

/// Top-level configuration shared by all jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Saved Wikipedia page both extractors read
    #[serde(default = "default_input_page")]
    pub input_page: PathBuf,

    #[serde(default)]
    pub links: LinkExtractorConfig,

    #[serde(default)]
    pub fetch: FetcherConfig,

    #[serde(default)]
    pub problems: ProblemExtractorConfig,

    #[serde(default)]
    pub dataset: DatasetConfig,
}

impl HarvestConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if provided
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.fetch.webdriver_url = webdriver_url;
            }
        }
    }
}

/// Default value for input_page
fn default_input_page() -> PathBuf {
    PathBuf::from("data/List of unsolved problems in mathematics - Wikipedia.html")
}

/// Default value for content_id
fn default_content_id() -> String {
    "mw-content-text".to_string()
}

/// Default value for item_limit
fn default_item_limit() -> usize {
    100
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

/// Default value for timeout_ms (30 seconds)
fn default_timeout_ms() -> u64 {
    30_000
}

/// Default value for delay_secs
fn default_delay_secs() -> u64 {
    3
}

/// Default value for error_backoff_secs
fn default_error_backoff_secs() -> u64 {
    5
}

/// Default value for problems_dir
fn default_problems_dir() -> PathBuf {
    PathBuf::from("data/problems")
}

/// Default value for min_item_len
fn default_min_item_len() -> usize {
    10
}

/// Default sections whose lists are dropped
fn default_skip_sections() -> Vec<String> {
    [
        "see also",
        "references",
        "external links",
        "notes",
        "further reading",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Default value for output_file
fn default_output_file() -> PathBuf {
    PathBuf::from("data/unsolved_problems.json")
}

/// Default path of the training split
fn default_train_path() -> PathBuf {
    PathBuf::from("Euclid30K/Euclid30K_train.parquet")
}

/// Default path of the validation split
fn default_val_path() -> PathBuf {
    PathBuf::from("Euclid30K/Euclid30K_val.parquet")
}

/// Default value for sample_rows
fn default_sample_rows() -> usize {
    3
}

/// Default value for image_dir
fn default_image_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            input_page: default_input_page(),
            links: LinkExtractorConfig::default(),
            fetch: FetcherConfig::default(),
            problems: ProblemExtractorConfig::default(),
            dataset: DatasetConfig::default(),
        }
    }
}

impl Default for LinkExtractorConfig {
    fn default() -> Self {
        Self {
            content_id: default_content_id(),
            item_limit: default_item_limit(),
            filter: LinkFilterConfig::default(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            delay_secs: default_delay_secs(),
            error_backoff_secs: default_error_backoff_secs(),
            problems_dir: default_problems_dir(),
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }
}

impl Default for ProblemExtractorConfig {
    fn default() -> Self {
        Self {
            content_id: default_content_id(),
            min_item_len: default_min_item_len(),
            skip_sections: default_skip_sections(),
            output_file: default_output_file(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            train_path: default_train_path(),
            val_path: default_val_path(),
            sample_rows: default_sample_rows(),
            image_dir: default_image_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = HarvestConfig::from_json("{}").unwrap();

        assert_eq!(config.input_page, default_input_page());
        assert_eq!(config.links.content_id, "mw-content-text");
        assert_eq!(config.links.item_limit, 100);
        assert_eq!(config.links.filter.keywords.len(), 5);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(30));
        assert_eq!(config.fetch.error_backoff(), Duration::from_secs(5));
        assert_eq!(config.problems.min_item_len, 10);
        assert_eq!(config.dataset.sample_rows, 3);
    }

    #[test]
    fn test_fetch_delay_default_is_three_seconds() {
        let parsed = HarvestConfig::from_json("{}").unwrap();

        assert_eq!(parsed.fetch.delay(), Duration::from_secs(3));
        assert_eq!(FetcherConfig::default().delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "links": { "item_limit": 250 },
            "fetch": { "delay_secs": 0, "problems_dir": "out/pages" }
        }"#;
        let config = HarvestConfig::from_json(json).unwrap();

        assert_eq!(config.links.item_limit, 250);
        assert_eq!(config.links.content_id, "mw-content-text");
        assert_eq!(config.fetch.delay(), Duration::ZERO);
        assert_eq!(config.fetch.problems_dir, PathBuf::from("out/pages"));
        assert_eq!(config.fetch.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.json");
        std::fs::write(&path, r#"{ "dataset": { "sample_rows": 5 } }"#).unwrap();

        let config = HarvestConfig::from_file(&path).unwrap();
        assert_eq!(config.dataset.sample_rows, 5);

        assert!(HarvestConfig::from_file(dir.path().join("missing.json")).is_err());
    }
}
