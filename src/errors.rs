/*!
 * Error types for the festfeed library.
 *
 * This module contains custom error types for the feed pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that abort a render pass
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// The transport call failed or returned a non-success status
    #[error("{}", network_message(.status, .message))]
    Network {
        /// HTTP status code, when a response was received at all
        status: Option<u16>,
        /// Human-readable detail
        message: String,
    },

    /// The sanitized payload is not well-formed XML
    #[error("Feed is malformed: {0}")]
    Parse(String),
}

fn network_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP error! status: {} ({})", code, message),
        None => format!("Network error: {}", message),
    }
}

impl FeedError {
    /// Build a network error for a non-success HTTP status
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Network {
            status: Some(code),
            message: message.into(),
        }
    }

    /// Build a network error for a failed connection
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    /// True when the feed text itself was the problem
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Errors from the optional image-search collaborator.
///
/// These never reach the user: the renderer substitutes the placeholder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageLookupError {
    /// Error when the search request could not be sent
    #[error("Image search request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the search API itself
    #[error("Image search responded with error: {status_code}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
    },

    /// Error when the search response could not be decoded
    #[error("Failed to parse image search response: {0}")]
    ParseError(String),
}

/// Errors found while validating configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Invalid language tag for {field}: {value}")]
    InvalidLanguage { field: &'static str, value: String },

    #[error("Threshold {field} must be in (0, 1], got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("Container ids must be non-empty and distinct")]
    InvalidContainers,

    #[error("Image search is enabled but no endpoint is configured")]
    MissingImageEndpoint,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from loading the feed
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
