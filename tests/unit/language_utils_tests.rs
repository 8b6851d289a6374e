/*!
 * Tests for language tag utilities
 */

use anyhow::Result;
use festfeed::language_utils::{get_language_name, is_valid_language_tag, language_tags_match, parse_language_tag};

#[test]
fn test_languageTagsMatch_shouldIgnoreCaseAndSeparator() {
    assert!(language_tags_match("zh-Hans", "zh-hans"));
    assert!(language_tags_match("en_US", "en-us"));
    assert!(!language_tags_match("zh-Hans", "zh-Hant"));
    assert!(!language_tags_match("zh", "zh-Hans"));
}

#[test]
fn test_languageTagsMatch_withEmptyTag_shouldNeverMatch() {
    assert!(!language_tags_match("", ""));
    assert!(!language_tags_match("en", " "));
}

#[test]
fn test_isValidLanguageTag_shouldAcceptCommonTags() {
    for tag in ["en", "zh-Hans", "zh-Hant-TW", "fr-CA", "es-419", "yue"] {
        assert!(is_valid_language_tag(tag), "expected {} to be valid", tag);
    }
    for tag in ["", "??", "english", "zh-Hans-Latn"] {
        assert!(!is_valid_language_tag(tag), "expected {} to be invalid", tag);
    }
}

#[test]
fn test_parseLanguageTag_shouldCanonicalize() -> Result<()> {
    assert_eq!(parse_language_tag("ZH-hant-tw")?.canonical(), "zh-Hant-TW");
    Ok(())
}

#[test]
fn test_getLanguageName_shouldUsePrimarySubtag() -> Result<()> {
    assert_eq!(get_language_name("zh-Hans")?, "Chinese");
    assert_eq!(get_language_name("en-GB")?, "English");
    assert!(get_language_name("qq").is_err());
    Ok(())
}
