/*!
 * Tests for feed sanitizing, parsing and entry views
 */

use festfeed::feed::sanitize::sanitize_entities;
use festfeed::feed::{TagStyle, culture_notes, parse_feed, program_entries};
use crate::common;

#[test]
fn test_sanitize_shouldOnlyRewriteBareAmpersands() {
    let input = "Rivers & Mountains &amp; Friends &lt;3 &#169; &#xA9; &nbsp;";
    let output = sanitize_entities(input);
    assert_eq!(
        output,
        "Rivers &amp; Mountains &amp; Friends &lt;3 &#169; &#xA9; &amp;nbsp;"
    );
}

#[test]
fn test_parseFeed_withBareAmpersand_shouldSucceed() {
    let doc = parse_feed(common::FESTIVAL_FEED).unwrap();
    let programs = program_entries(&doc);
    assert_eq!(programs.len(), 2);
    assert_eq!(programs[1].performer(), "Rivers & Mountains Ensemble");
}

#[test]
fn test_parseFeed_withMalformedXml_shouldBeParseError() {
    let error = parse_feed(common::MALFORMED_FEED).unwrap_err();
    assert!(error.is_parse());
}

#[test]
fn test_parseFeed_withEmptyText_shouldBeParseError() {
    assert!(parse_feed("").unwrap_err().is_parse());
    assert!(parse_feed("   ").unwrap_err().is_parse());
}

#[test]
fn test_programEntries_shouldReadBilingualFields() {
    let doc = parse_feed(common::FESTIVAL_FEED).unwrap();
    let programs = program_entries(&doc);

    assert_eq!(programs[0].number(), "1");
    assert_eq!(programs[0].title("zh-Hans"), "醒狮迎春");
    assert_eq!(programs[0].title("en"), "Awakening Lion");
    assert_eq!(programs[0].genre("en"), "Lion Dance");
    assert_eq!(programs[0].bio("zh-Hans"), "");
    // Language tags compare case-insensitively
    assert_eq!(programs[0].title("ZH-hans"), "醒狮迎春");
    assert_eq!(programs[0].title("zh-Hant"), "");
}

#[test]
fn test_cultureNotes_shouldClassifyCategory() {
    let doc = parse_feed(common::FESTIVAL_FEED).unwrap();
    let notes = culture_notes(&doc);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].tag_style(), TagStyle::HandsOn);
    assert_eq!(notes[0].image(), None);
    assert_eq!(notes[0].desc("en"), "Cut your own window flower.");
}

#[test]
fn test_legacyFeed_shouldFallBackToChildTextAndLangAttribute() {
    let doc = parse_feed(common::LEGACY_FEED).unwrap();

    let programs = program_entries(&doc);
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].number(), "1");
    assert_eq!(programs[0].performer(), "Erhu Duo");
    assert_eq!(programs[0].title("en"), "Horse Racing");

    let notes = culture_notes(&doc);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].category(), "Culture 101");
    assert_eq!(notes[0].tag_style(), TagStyle::Culture101);
    assert_eq!(notes[0].image().as_deref(), Some("https://img.test/kite.jpg"));
}

#[test]
fn test_feedWithoutSections_shouldHaveNoEntries() {
    let doc = parse_feed("<festival><news/></festival>").unwrap();
    assert!(program_entries(&doc).is_empty());
    assert!(culture_notes(&doc).is_empty());
}

#[test]
fn test_parseFeed_withDeeplyNestedItem_shouldBeParseError() {
    let depth = 50_000;
    let feed = format!(
        "<festival><program><item>{}{}</item></program></festival>",
        "<x>".repeat(depth),
        "</x>".repeat(depth)
    );
    let error = parse_feed(&feed).unwrap_err();
    assert!(error.is_parse());
    assert!(error.to_string().contains("nested deeper"));
}
