/*!
 * Tests for error types and conversions
 */

use festfeed::errors::{AppError, ConfigError, FeedError, ImageLookupError};

#[test]
fn test_feedError_withStatus_shouldDisplayHttpStatus() {
    let error = FeedError::status(500, "non-success response");
    let display = format!("{}", error);
    assert!(display.contains("HTTP error! status: 500"));
    assert!(!error.is_parse());
}

#[test]
fn test_feedError_connection_shouldHaveNoStatus() {
    let error = FeedError::connection("connection refused");
    assert!(matches!(error, FeedError::Network { status: None, .. }));
    assert!(format!("{}", error).contains("connection refused"));
}

#[test]
fn test_feedError_parse_shouldBeParse() {
    let error = FeedError::Parse("Unclosed element <item>".to_string());
    assert!(error.is_parse());
    assert!(format!("{}", error).contains("Unclosed element"));
}

#[test]
fn test_imageLookupError_apiError_shouldDisplayStatus() {
    let error = ImageLookupError::ApiError { status_code: 403 };
    assert!(format!("{}", error).contains("403"));
}

#[test]
fn test_appError_fromFeedError_shouldWrap() {
    let app_error: AppError = FeedError::status(404, "missing").into();
    assert!(matches!(app_error, AppError::Feed(_)));
    assert!(format!("{}", app_error).contains("404"));
}

#[test]
fn test_appError_fromConfigError_shouldWrap() {
    let app_error: AppError = ConfigError::InvalidContainers.into();
    assert!(matches!(app_error, AppError::Config(ConfigError::InvalidContainers)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}

