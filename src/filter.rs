use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration for deciding which anchors point at problem articles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkFilterConfig {
    /// Words that mark a link as problem-related (matched case-insensitively)
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Substrings that reject an href outright (matched case-sensitively)
    #[serde(default = "default_excluded_markers")]
    pub excluded_markers: Vec<String>,

    /// Origin that relative article hrefs are resolved against
    #[serde(default = "default_origin")]
    pub origin: String,
}

/// Default keywords that mark a problem link
fn default_keywords() -> Vec<String> {
    ["conjecture", "hypothesis", "problem", "theorem", "prize"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Default markers of citation, edit and red links
fn default_excluded_markers() -> Vec<String> {
    ["#cite", "edit", "redlink"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Default value for origin
fn default_origin() -> String {
    "https://en.wikipedia.org".to_string()
}

impl Default for LinkFilterConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            excluded_markers: default_excluded_markers(),
            origin: default_origin(),
        }
    }
}

/// Path prefix of the Wikipedia article namespace
pub const ARTICLE_PATH: &str = "/wiki/";

/// Marker that identifies an absolute Wikipedia article href
const ARTICLE_MARKER: &str = "wikipedia.org/wiki/";

/// Filter that decides whether an anchor is a problem article link and
/// resolves it to an absolute URL
#[derive(Debug)]
pub struct LinkFilter {
    config: LinkFilterConfig,
    keyword_regex: Option<Regex>,
    article_prefix: String,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new(LinkFilterConfig::default()).expect("Default keywords should be valid")
    }
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        let keyword_regex = if config.keywords.is_empty() {
            None
        } else {
            let alternation = config
                .keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!("(?i){}", alternation))?)
        };

        let article_prefix = format!("{}{}", config.origin.trim_end_matches('/'), ARTICLE_PATH);

        Ok(Self {
            config,
            keyword_regex,
            article_prefix,
        })
    }

    /// Determine if an anchor should be kept, based on all filtering rules
    pub fn accepts(&self, href: &str, title: &str, text: &str) -> bool {
        self.mentions_keyword(href, title, text)
            && Self::is_article_href(href)
            && !self.is_excluded(href)
    }

    /// Check whether any keyword appears in the href, title or text
    pub fn mentions_keyword(&self, href: &str, title: &str, text: &str) -> bool {
        match &self.keyword_regex {
            Some(regex) => regex.is_match(href) || regex.is_match(title) || regex.is_match(text),
            None => false,
        }
    }

    /// Check whether an href targets the article namespace
    pub fn is_article_href(href: &str) -> bool {
        href.starts_with(ARTICLE_PATH) || href.contains(ARTICLE_MARKER)
    }

    /// Check whether an href is a citation, edit or red link
    pub fn is_excluded(&self, href: &str) -> bool {
        self.config
            .excluded_markers
            .iter()
            .any(|marker| href.contains(marker.as_str()))
    }

    /// Resolve an href to an absolute article URL.
    ///
    /// Relative `/wiki/` paths are joined onto the origin, absolute article
    /// URLs on the origin are kept as-is, anything else yields `None`.
    pub fn resolve(&self, href: &str) -> Option<String> {
        if href.starts_with(ARTICLE_PATH) {
            Some(format!("{}{}", self.config.origin.trim_end_matches('/'), href))
        } else if href.starts_with(&self.article_prefix) {
            Some(href.to_string())
        } else {
            None
        }
    }

    /// Check whether an absolute URL lies in the origin's article namespace
    pub fn is_article_url(&self, url: &str) -> bool {
        url.starts_with(&self.article_prefix)
    }
}
