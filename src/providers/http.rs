use async_trait::async_trait;
use log::debug;
use reqwest::{Client, header};
use std::time::Duration;

use crate::errors::FeedError;
use crate::providers::{FeedSource, FetchResponse};

/// reqwest-backed feed transport
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    /// HTTP client for making requests
    client: Client,
}

impl HttpFeedSource {
    /// Create a new feed source with the given request timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .user_agent(concat!("festfeed/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::new(30)
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FeedError> {
        debug!("Fetching feed from {}", url);

        // The feed is edited by hand; always ask for the latest copy
        let response = self.client.get(url)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| FeedError::connection(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| FeedError::connection(format!("Failed to read response body: {}", e)))?;

        debug!("Feed responded with {} ({} bytes)", status, body.len());
        Ok(FetchResponse::new(status.as_u16(), body))
    }
}
