//! Feed client: reads station and line payloads from a file or over HTTP.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use super::error::CatalogError;

/// Riyadh open-data endpoint for the station feed.
pub const DEFAULT_STATIONS_URL: &str = "https://opendata.rcrc.gov.sa/api/explore/v2.1/catalog/datasets/metro-stations-in-riyadh-by-metro-line-and-station-type-2024/records?limit=-1";

/// Where a payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local file.
    File(PathBuf),
    /// HTTP(S) URL.
    Url(String),
}

impl DataSource {
    /// Interpret a string as a URL if it has an `http://` or `https://`
    /// scheme, otherwise as a file path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DataSource::Url(s.to_string())
        } else {
            DataSource::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedClientConfig {
    /// Create a config with the default timeout (30 seconds).
    pub fn new() -> Self {
        Self { timeout_secs: 30 }
    }

    /// Set a custom timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client that fetches raw payload text.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedClientConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    /// Fetch the payload body from a source.
    pub async fn fetch(&self, source: &DataSource) -> Result<String, CatalogError> {
        debug!(source = %source, "Fetching payload");
        match source {
            DataSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| CatalogError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })
            }
            DataSource::Url(url) => self.fetch_url(url).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}
