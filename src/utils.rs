use crate::filter::ARTICLE_PATH;
use std::path::Path;
use url::Url;

/// Convert an article URL to the file name its page is stored under.
///
/// The `/wiki/` prefix is dropped and remaining path separators become
/// underscores, e.g. `https://en.wikipedia.org/wiki/Riemann_hypothesis`
/// becomes `Riemann_hypothesis.html`. The path is taken from the URL text
/// as written, so `Erdős–Straus_conjecture` keeps its characters and
/// `Goldbach%27s_conjecture` keeps its escapes.
pub fn slugify_article_url(url: &str) -> Result<String, url::ParseError> {
    Url::parse(url)?;

    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let without_query = after_scheme.split(['?', '#']).next().unwrap_or_default();
    let path = without_query
        .find('/')
        .map_or("", |start| &without_query[start..]);

    let name = path.replace(ARTICLE_PATH, "").replace('/', "_");
    Ok(format!("{}.html", name))
}

/// True if the path exists and holds at least one byte
pub fn is_nonempty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

/// Shorten text to `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_article_url() {
        assert_eq!(
            slugify_article_url("https://en.wikipedia.org/wiki/Riemann_hypothesis").unwrap(),
            "Riemann_hypothesis.html"
        );
        assert_eq!(
            slugify_article_url("https://en.wikipedia.org/wiki/Talk:Collatz/Archive").unwrap(),
            "Talk:Collatz_Archive.html"
        );
        assert!(slugify_article_url("not a url").is_err());
    }

    #[test]
    fn test_slugify_keeps_title_as_written() {
        assert_eq!(
            slugify_article_url("https://en.wikipedia.org/wiki/Erdős–Straus_conjecture").unwrap(),
            "Erdős–Straus_conjecture.html"
        );
        assert_eq!(
            slugify_article_url("https://en.wikipedia.org/wiki/Goldbach%27s_conjecture").unwrap(),
            "Goldbach%27s_conjecture.html"
        );
        assert_eq!(
            slugify_article_url("https://en.wikipedia.org/wiki/Collatz_conjecture?oldid=1#History")
                .unwrap(),
            "Collatz_conjecture.html"
        );
    }

    #[test]
    fn test_is_nonempty_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.html");
        let full = dir.path().join("full.html");
        std::fs::write(&empty, "").unwrap();
        std::fs::write(&full, "<html></html>").unwrap();

        assert!(!is_nonempty_file(&empty));
        assert!(is_nonempty_file(&full));
        assert!(!is_nonempty_file(&dir.path().join("missing.html")));
        assert!(!is_nonempty_file(dir.path()));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 60), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("déjà vu", 4), "déjà...");
    }
}
