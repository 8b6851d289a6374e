/*!
 * Network collaborators for the feed pipeline.
 *
 * This module contains the two outbound seams:
 * - `FeedSource`: fetches the raw feed text (reqwest in production)
 * - `ImageSearch`: best-effort image lookup for notes without an image
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::{FeedError, ImageLookupError};

/// A response received from a feed source, successful or not
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used by the feed loader
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status, and `FeedError::Network` only when no response was received or
/// its body could not be read.
#[async_trait]
pub trait FeedSource: Send + Sync + Debug {
    /// Fetch the resource at `url`, bypassing caches
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FeedError>;
}

/// External image search used to illustrate notes without an image
#[async_trait]
pub trait ImageSearch: Send + Sync + Debug {
    /// URL of the first result for `query`, or `None` when nothing matched
    async fn first_image(&self, query: &str) -> Result<Option<String>, ImageLookupError>;
}

pub mod http;
pub mod image_search;
pub mod mock;
