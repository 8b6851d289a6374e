/*!
 * Entity sanitization for hand-edited feed text.
 *
 * Free-text fields in the feed regularly contain bare ampersands
 * ("Bed & Breakfast") that would otherwise make the whole document
 * unparseable. Every `&` that does not start one of the five predefined
 * XML escapes or a numeric character reference is rewritten to `&amp;`.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Matches every ampersand; group 1 is present only when the ampersand
/// begins a recognized escape sequence.
static AMPERSAND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(amp;|lt;|gt;|quot;|apos;|#[0-9]+;|#[xX][0-9a-fA-F]+;)?")
        .expect("ampersand pattern is valid")
});

/// Escape bare ampersands, leaving recognized escapes untouched
pub fn sanitize_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    AMPERSAND_REGEX.replace_all(text, |caps: &Captures| match caps.get(1) {
        Some(escape) => format!("&{}", escape.as_str()),
        None => "&amp;".to_string(),
    })
}

/// Count the ampersands that sanitization would rewrite
pub fn count_bare_ampersands(text: &str) -> usize {
    AMPERSAND_REGEX
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_none())
        .count()
}
