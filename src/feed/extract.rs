//! Localized field lookup.
//!
//! Absence is the common case (not every entry carries both languages),
//! so none of these functions fail: a missing field is an empty string.

use crate::feed::document::XmlNode;
use crate::language_utils::language_tags_match;

/// Text of the first descendant `field` whose language tag matches `lang`.
pub fn text(node: &XmlNode, field: &str, lang: &str) -> String {
    node.descendants(field)
        .into_iter()
        .find(|candidate| candidate.lang().is_some_and(|tag| language_tags_match(tag, lang)))
        .map(XmlNode::text)
        .unwrap_or_default()
}

/// Text of the first descendant `field`, whatever its language.
pub fn first_text(node: &XmlNode, field: &str) -> String {
    node.descendants(field)
        .into_iter()
        .next()
        .map(XmlNode::text)
        .unwrap_or_default()
}

/// Attribute `name` if present and non-blank, otherwise `first_text(node, name)`.
pub fn attr_or_text(node: &XmlNode, name: &str) -> String {
    match node.attr(name).map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => first_text(node, name),
    }
}
