use log::{debug, error, warn};
use std::sync::Arc;

use crate::errors::FeedError;
use crate::feed::document::FeedDocument;
use crate::feed::sanitize::{count_bare_ampersands, sanitize_entities};
use crate::providers::FeedSource;

/// Fetches, sanitizes and parses the festival feed
#[derive(Debug, Clone)]
pub struct FeedLoader {
    source: Arc<dyn FeedSource>,
}

impl FeedLoader {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self { source }
    }

    /// Load the feed at `url`.
    ///
    /// Fails with `FeedError::Network` when no successful response arrives
    /// and with `FeedError::Parse` when the sanitized text is not
    /// well-formed.
    pub async fn load(&self, url: &str) -> Result<FeedDocument, FeedError> {
        let response = self.source.fetch(url).await.inspect_err(|e| {
            error!("Feed request failed: {}", e);
        })?;

        if !response.is_success() {
            error!("Feed request to {} returned status {}", url, response.status);
            return Err(FeedError::status(response.status, "non-success response"));
        }

        parse_feed(&response.body)
    }
}

/// Sanitize and parse feed text
pub fn parse_feed(text: &str) -> Result<FeedDocument, FeedError> {
    let rewritten = count_bare_ampersands(text);
    if rewritten > 0 {
        warn!("Escaped {} bare ampersand(s) in feed text", rewritten);
    }

    let sanitized = sanitize_entities(text);
    let document = FeedDocument::parse(&sanitized).inspect_err(|e| {
        error!("XML parsing error: {}", e);
    })?;

    debug!("Parsed feed with root <{}>", document.root().name());
    Ok(document)
}
