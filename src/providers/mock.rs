/*!
 * Mock collaborators for testing.
 *
 * - `MockFeedSource` replays a scripted HTTP response or a connection failure
 * - `MockImageSearch` answers image lookups without touching the network
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::{FeedError, ImageLookupError};
use crate::providers::{FeedSource, FetchResponse, ImageSearch};

/// Behavior mode for the mock feed source
#[derive(Debug, Clone, PartialEq)]
pub enum MockFeedBehavior {
    /// Respond with the given status and body
    Respond { status: u16, body: String },
    /// Fail before any response arrives
    Unreachable,
}

/// Mock feed transport
#[derive(Debug, Clone)]
pub struct MockFeedSource {
    behavior: MockFeedBehavior,
    /// Shared between clones so tests can count fetches
    request_count: Arc<AtomicUsize>,
    requested_urls: Arc<Mutex<Vec<String>>>,
}

impl MockFeedSource {
    pub fn new(behavior: MockFeedBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requested_urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Respond 200 with the given feed text
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    /// Respond with an arbitrary status
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockFeedBehavior::Respond {
            status,
            body: body.into(),
        })
    }

    /// Fail with a connection error
    pub fn unreachable() -> Self {
        Self::new(MockFeedBehavior::Unreachable)
    }

    /// Number of fetches made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// URLs fetched so far, in order
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested_urls.lock().clone()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FeedError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requested_urls.lock().push(url.to_string());

        match &self.behavior {
            MockFeedBehavior::Respond { status, body } => Ok(FetchResponse::new(*status, body.clone())),
            MockFeedBehavior::Unreachable => Err(FeedError::connection("Simulated connection failure")),
        }
    }
}

/// Behavior mode for the mock image search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockImageBehavior {
    /// Return `https://images.test/<slug of query>.jpg`
    Working,
    /// Return no results
    Empty,
    /// Always fail with an API error
    Failing,
    /// Fail only for queries containing the given text
    FailingFor(&'static str),
}

/// Mock image search
#[derive(Debug, Clone)]
pub struct MockImageSearch {
    behavior: MockImageBehavior,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockImageSearch {
    pub fn new(behavior: MockImageBehavior) -> Self {
        Self {
            behavior,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockImageBehavior::Working)
    }

    pub fn empty() -> Self {
        Self::new(MockImageBehavior::Empty)
    }

    pub fn failing() -> Self {
        Self::new(MockImageBehavior::Failing)
    }

    /// Queries received so far, in arrival order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    /// URL the working mock returns for a query
    pub fn url_for(query: &str) -> String {
        let slug: String = query
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("https://images.test/{}.jpg", slug)
    }
}

#[async_trait]
impl ImageSearch for MockImageSearch {
    async fn first_image(&self, query: &str) -> Result<Option<String>, ImageLookupError> {
        self.queries.lock().push(query.to_string());

        match self.behavior {
            MockImageBehavior::Working => Ok(Some(Self::url_for(query))),
            MockImageBehavior::Empty => Ok(None),
            MockImageBehavior::Failing => Err(ImageLookupError::ApiError { status_code: 503 }),
            MockImageBehavior::FailingFor(needle) if query.contains(needle) => {
                Err(ImageLookupError::RequestFailed(format!("Simulated failure for '{}'", query)))
            }
            MockImageBehavior::FailingFor(_) => Ok(Some(Self::url_for(query))),
        }
    }
}
