use serde::{Deserialize, Serialize};

/// A candidate link to a problem article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Absolute URL of the article
    pub url: String,

    /// Value of the anchor's `title` attribute (empty if missing)
    pub title: String,

    /// Visible anchor text
    pub text: String,
}

impl LinkRecord {
    /// Create a new link record
    pub fn new(url: String, title: String, text: String) -> Self {
        Self { url, title, text }
    }
}

/// Problem statements grouped under a section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Heading text the problems were found under
    pub category: String,

    /// Problem statements in document order
    pub problems: Vec<String>,
}

impl CategoryRecord {
    pub fn new(category: String, problems: Vec<String>) -> Self {
        Self { category, problems }
    }
}

/// Counters reported by the page download driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}
