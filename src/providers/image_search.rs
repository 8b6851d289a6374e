use async_trait::async_trait;
use log::debug;
use reqwest::{Client, header};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::errors::ImageLookupError;
use crate::providers::ImageSearch;

/// Client for an Unsplash-compatible photo search endpoint
///
/// `GET {endpoint}?query=<title>&per_page=1`, answered with
/// `{"results": [{"urls": {"small": "..."}}]}`.
#[derive(Debug, Clone)]
pub struct HttpImageSearch {
    /// HTTP client for API requests
    client: Client,
    /// Search endpoint URL
    endpoint: String,
    /// Access key, sent as `Authorization: Client-ID <key>` when set
    api_key: String,
}

/// Search response body
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One search hit
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub urls: ResultUrls,
}

/// Rendition URLs of a hit; `small` is preferred, `regular` is the fallback
#[derive(Debug, Deserialize)]
pub struct ResultUrls {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub regular: Option<String>,
}

impl SearchResponse {
    /// URL of the first usable result
    pub fn first_url(self) -> Option<String> {
        self.results
            .into_iter()
            .find_map(|result| result.urls.small.or(result.urls.regular))
            .filter(|url| !url.trim().is_empty())
    }
}

impl HttpImageSearch {
    /// Create a new image search client
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the request URL for a query
    pub fn search_url(&self, query: &str) -> Result<Url, ImageLookupError> {
        Url::parse_with_params(&self.endpoint, &[("query", query), ("per_page", "1")])
            .map_err(|e| ImageLookupError::RequestFailed(format!("Invalid search endpoint {}: {}", self.endpoint, e)))
    }
}

#[async_trait]
impl ImageSearch for HttpImageSearch {
    async fn first_image(&self, query: &str) -> Result<Option<String>, ImageLookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let url = self.search_url(query)?;
        let mut request = self.client.get(url).header(header::ACCEPT, "application/json");
        if !self.api_key.is_empty() {
            request = request.header(header::AUTHORIZATION, format!("Client-ID {}", self.api_key));
        }

        let response = request.send().await
            .map_err(|e| ImageLookupError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageLookupError::ApiError { status_code: status.as_u16() });
        }

        let body = response.json::<SearchResponse>().await
            .map_err(|e| ImageLookupError::ParseError(e.to_string()))?;

        let found = body.first_url();
        debug!("Image search for '{}' -> {:?}", query, found);
        Ok(found)
    }
}
