//! Language utilities for the language tags used in the feed
//!
//! Feed fields are tagged with BCP 47 style tags such as `zh-Hans` or `en`.
//! The primary subtag is checked against ISO 639-1 / ISO 639-3 and the
//! remaining subtags are checked for shape only.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Parsed shape of a language tag
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageTag {
    /// Primary language subtag, lowercased
    pub language: String,
    /// Optional script subtag, title-cased (e.g. "Hans")
    pub script: Option<String>,
    /// Optional region subtag, uppercased (e.g. "TW")
    pub region: Option<String>,
}

impl LanguageTag {
    /// Canonical string form of the tag
    pub fn canonical(&self) -> String {
        let mut out = self.language.clone();
        if let Some(script) = &self.script {
            out.push('-');
            out.push_str(script);
        }
        if let Some(region) = &self.region {
            out.push('-');
            out.push_str(region);
        }
        out
    }
}

/// Validate a language tag and return its parsed form
pub fn parse_language_tag(tag: &str) -> Result<LanguageTag> {
    let trimmed = tag.trim();
    let mut parts = trimmed.split(['-', '_']);

    let primary = parts.next().unwrap_or_default().to_lowercase();
    let known = match primary.len() {
        2 => Language::from_639_1(&primary).is_some(),
        3 => Language::from_639_3(&primary).is_some(),
        _ => false,
    };
    if !known {
        return Err(anyhow!("Invalid language tag: {}", tag));
    }

    let mut parsed = LanguageTag {
        language: primary,
        script: None,
        region: None,
    };

    for part in parts {
        let is_alpha = part.chars().all(|c| c.is_ascii_alphabetic());
        let is_digit = part.chars().all(|c| c.is_ascii_digit());
        match part.len() {
            4 if is_alpha && parsed.script.is_none() && parsed.region.is_none() => {
                let mut chars = part.chars();
                let first = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
                parsed.script = Some(std::iter::once(first).chain(chars.map(|c| c.to_ascii_lowercase())).collect());
            }
            2 if is_alpha && parsed.region.is_none() => {
                parsed.region = Some(part.to_uppercase());
            }
            3 if is_digit && parsed.region.is_none() => {
                parsed.region = Some(part.to_string());
            }
            _ => return Err(anyhow!("Invalid subtag '{}' in language tag: {}", part, tag)),
        }
    }

    Ok(parsed)
}

/// Check whether a language tag is well formed
pub fn is_valid_language_tag(tag: &str) -> bool {
    parse_language_tag(tag).is_ok()
}

/// Check if two tags name the same language variant.
///
/// Tags compare case-insensitively; `zh-Hans` and `zh-hans` match,
/// `zh-Hans` and `zh-Hant` do not.
pub fn language_tags_match(tag1: &str, tag2: &str) -> bool {
    let a = tag1.trim();
    let b = tag2.trim();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.len() == b.len()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            let x = if x == '_' { '-' } else { x };
            let y = if y == '_' { '-' } else { y };
            x.eq_ignore_ascii_case(&y)
        })
}

/// Get the English language name for a tag's primary subtag
pub fn get_language_name(tag: &str) -> Result<String> {
    let parsed = parse_language_tag(tag)?;
    let lang = if parsed.language.len() == 2 {
        Language::from_639_1(&parsed.language)
    } else {
        Language::from_639_3(&parsed.language)
    }
    .ok_or_else(|| anyhow!("Failed to get language from tag: {}", tag))?;

    Ok(lang.to_name().to_string())
}
