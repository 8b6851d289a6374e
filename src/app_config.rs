use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::ConfigError;
use crate::interaction::InteractionSettings;
use crate::language_utils::is_valid_language_tag;
use crate::view::render::{NoteOrder, RenderOptions};

/// Application configuration module
/// This module handles loading, validating and saving the festfeed
/// configuration (`conf.json` by default).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Where the feed comes from
    #[serde(default)]
    pub feed: FeedConfig,

    /// Page structure and language pair
    #[serde(default)]
    pub page: PageConfig,

    /// Culture note presentation
    #[serde(default)]
    pub notes: NotesConfig,

    /// Optional image lookup for notes without an image
    #[serde(default)]
    pub image_search: ImageSearchConfig,

    /// Observer tuning
    #[serde(default)]
    pub interaction: InteractionSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_feed_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PageConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_program_container")]
    pub program_container: String,

    #[serde(default = "default_culture_container")]
    pub culture_container: String,

    /// Main display language
    #[serde(default = "default_primary_language")]
    pub primary_language: String,

    /// Subtitle display language
    #[serde(default = "default_secondary_language")]
    pub secondary_language: String,

    /// Language of failure messages
    #[serde(default = "default_ui_language")]
    pub ui_language: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NotesConfig {
    #[serde(default)]
    pub order: NoteOrder,

    /// Fixed seed for reproducible shuffles
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageSearchConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_image_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_image_timeout_secs")]
    pub timeout_secs: u64,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_feed_url() -> String {
    "https://qioffe.github.io/25_Chinese_Culture_Festival/festivalData".to_string()
}

fn default_feed_timeout_secs() -> u64 {
    30
}

fn default_title() -> String {
    "Chinese Culture Festival".to_string()
}

fn default_program_container() -> String {
    "program-list".to_string()
}

fn default_culture_container() -> String {
    "culture-list".to_string()
}

fn default_primary_language() -> String {
    "zh-Hans".to_string()
}

fn default_secondary_language() -> String {
    "en".to_string()
}

fn default_ui_language() -> String {
    "en".to_string()
}

fn default_placeholder_image() -> String {
    RenderOptions::default().placeholder_image
}

fn default_image_endpoint() -> String {
    "https://api.unsplash.com/search/photos".to_string()
}

fn default_image_timeout_secs() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_secs: default_feed_timeout_secs(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            program_container: default_program_container(),
            culture_container: default_culture_container(),
            primary_language: default_primary_language(),
            secondary_language: default_secondary_language(),
            ui_language: default_ui_language(),
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            order: NoteOrder::default(),
            seed: None,
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Default for ImageSearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_image_endpoint(),
            api_key: String::new(),
            timeout_secs: default_image_timeout_secs(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            feed: FeedConfig::default(),
            page: PageConfig::default(),
            notes: NotesConfig::default(),
            image_search: ImageSearchConfig::default(),
            interaction: InteractionSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("feed.url", &self.feed.url)?;

        for (field, value) in [
            ("page.primary_language", &self.page.primary_language),
            ("page.secondary_language", &self.page.secondary_language),
            ("page.ui_language", &self.page.ui_language),
        ] {
            if !is_valid_language_tag(value) {
                return Err(ConfigError::InvalidLanguage {
                    field,
                    value: value.clone(),
                });
            }
        }

        let program = self.page.program_container.trim();
        let culture = self.page.culture_container.trim();
        if program.is_empty() || culture.is_empty() || program == culture {
            return Err(ConfigError::InvalidContainers);
        }

        check_threshold("interaction.reveal_threshold", self.interaction.reveal_threshold)?;
        check_threshold("interaction.theme_threshold", self.interaction.theme_threshold)?;

        if self.image_search.enabled {
            if self.image_search.endpoint.trim().is_empty() {
                return Err(ConfigError::MissingImageEndpoint);
            }
            check_url("image_search.endpoint", &self.image_search.endpoint)?;
        }

        Ok(())
    }

    /// Load the config at `path`, or write and return the defaults when the
    /// file does not exist yet.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path).context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            log::warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json).context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Markup settings derived from the page and notes sections
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            primary_language: self.page.primary_language.clone(),
            secondary_language: self.page.secondary_language.clone(),
            placeholder_image: self.notes.placeholder_image.clone(),
            note_order: self.notes.order,
            shuffle_seed: self.notes.seed,
            ..RenderOptions::default()
        }
    }

    pub fn container_ids(&self) -> [&str; 2] {
        [self.page.program_container.as_str(), self.page.culture_container.as_str()]
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}
