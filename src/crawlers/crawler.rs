use std::path::Path;

/// Something that can save a rendered page to disk
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Download `url` into `path`, returning whether it succeeded.
    ///
    /// Failures are reported through the log, never as a panic.
    async fn download(&self, url: &str, path: &Path) -> bool;
}
