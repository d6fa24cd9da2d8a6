use crate::config::FetcherConfig;
use crate::crawlers::PageFetcher;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::error::Error;
use std::path::Path;
use tokio::time::timeout;

/// Fetches pages through a WebDriver-controlled headless Chrome.
///
/// Every download opens its own browser session and closes it again, so no
/// state is shared between calls.
pub struct WebDriverFetcher {
    config: FetcherConfig,
}

impl WebDriverFetcher {
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    /// Capabilities for a headless Chrome presenting the configured user agent
    fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": [
                    "--headless=new",
                    "--disable-gpu",
                    format!("--user-agent={}", self.config.user_agent),
                ]
            }),
        );
        caps
    }

    /// Opens a new browser session
    async fn connect(&self) -> Result<Client, Box<dyn Error>> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());
        let client = builder.connect(&self.config.webdriver_url).await?;
        ::log::debug!("Connected to WebDriver at {}", self.config.webdriver_url);
        Ok(client)
    }

    /// Renders `url` in a fresh session and writes its source to `path`
    async fn render_to_file(&self, url: &str, path: &Path) -> Result<(), Box<dyn Error>> {
        let client = self.connect().await?;

        let rendered = timeout(self.config.timeout(), async {
            client.goto(url).await?;
            let source = client.source().await?;
            Ok::<_, CmdError>(source)
        })
        .await;

        // The session is closed whatever the navigation outcome
        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        let html = match rendered {
            Ok(source) => source?,
            Err(_) => {
                return Err(format!("timed out after {} ms", self.config.timeout_ms).into());
            }
        };

        tokio::fs::write(path, html).await?;
        Ok(())
    }
}

impl PageFetcher for WebDriverFetcher {
    async fn download(&self, url: &str, path: &Path) -> bool {
        match self.render_to_file(url, path).await {
            Ok(()) => {
                ::log::debug!("Saved {} to {}", url, path.display());
                tokio::time::sleep(self.config.delay()).await;
                true
            }
            Err(e) => {
                ::log::error!("Error downloading {}: {}", url, e);
                tokio::time::sleep(self.config.error_backoff()).await;
                false
            }
        }
    }
}
