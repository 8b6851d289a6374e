/*!
 * Tests for configuration defaults, validation and persistence
 */

use anyhow::Result;
use festfeed::app_config::{Config, LogLevel};
use festfeed::errors::ConfigError;
use festfeed::view::render::NoteOrder;
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.page.program_container, "program-list");
    assert_eq!(config.page.culture_container, "culture-list");
    assert_eq!(config.page.primary_language, "zh-Hans");
    assert!(config.feed.url.ends_with("/festivalData"));
    assert!(!config.image_search.enabled);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_validate_withBadFeedUrl_shouldFail() {
    let mut config = Config::default();
    config.feed.url = "not a url".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { field: "feed.url", .. })));

    config.feed.url = "ftp://example.com/feed".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { .. })));
}

#[test]
fn test_validate_withBadLanguage_shouldFail() {
    let mut config = Config::default();
    config.page.secondary_language = "xx-notalanguage-tag-at-all".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidLanguage { .. })));
}

#[test]
fn test_validate_withSameContainers_shouldFail() {
    let mut config = Config::default();
    config.page.culture_container = config.page.program_container.clone();
    assert_eq!(config.validate(), Err(ConfigError::InvalidContainers));

    config.page.culture_container = "  ".to_string();
    assert_eq!(config.validate(), Err(ConfigError::InvalidContainers));
}

#[test]
fn test_validate_withThresholdOutOfRange_shouldFail() {
    let mut config = Config::default();
    config.interaction.reveal_threshold = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold { .. })));

    config.interaction.reveal_threshold = 0.1;
    config.interaction.theme_threshold = 1.5;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold { .. })));
}

#[test]
fn test_validate_withImageSearchWithoutEndpoint_shouldFail() {
    let mut config = Config::default();
    config.image_search.enabled = true;
    config.image_search.endpoint = String::new();
    assert_eq!(config.validate(), Err(ConfigError::MissingImageEndpoint));
}

#[test]
fn test_partialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(
        r#"{ "feed": { "url": "https://feeds.test/festival" }, "notes": { "order": "shuffled", "seed": 42 } }"#,
    )?;
    assert_eq!(config.feed.url, "https://feeds.test/festival");
    assert_eq!(config.feed.timeout_secs, 30);
    assert_eq!(config.notes.order, NoteOrder::Shuffled);
    assert_eq!(config.notes.seed, Some(42));
    assert_eq!(config.interaction.reveal_margin_bottom, -50.0);

    let options = config.render_options();
    assert_eq!(options.note_order, NoteOrder::Shuffled);
    assert_eq!(options.shuffle_seed, Some(42));
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded, created);
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    let error = Config::load_or_create(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
    Ok(())
}
