//! Remote catalog source
//!
//! Fetches catalog documents from the Winlay asset host over HTTP. The
//! `CatalogSource` trait is the seam the cache talks to, so tests can swap
//! the network for canned bodies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::CatalogKind;

/// Base URL of the Winlay asset host
pub const DEFAULT_BASE_URL: &str = "https://winlayassets.a3x.xyz/json";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when fetching a catalog
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned {0}")]
    Status(StatusCode),

    /// Failed to parse the catalog document
    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Anything that can produce the raw body of a catalog document
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the body of the given catalog
    async fn fetch_body(&self, kind: CatalogKind) -> Result<String, FetchError>;
}

/// Fetches catalogs from the asset host over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Creates a source for the default asset host
    pub fn new() -> Self {
        Self::with_client(Client::new(), DEFAULT_BASE_URL)
    }

    /// Creates a source with a custom HTTP client and base URL
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Creates a source whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// The base URL catalog file names are appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a catalog document
    pub fn catalog_url(&self, kind: CatalogKind) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), kind.file_name())
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch_body(&self, kind: CatalogKind) -> Result<String, FetchError> {
        let url = self.catalog_url(kind);
        log::debug!("Fetching {} catalog from {}", kind, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}
