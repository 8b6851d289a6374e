/*!
 * Read-only views over the entries of a parsed feed.
 *
 * Program items live under `program/item`; culture notes under
 * `cultureNotes/note`, with a legacy `culture` section (children `note`
 * or `item`) read only when no `cultureNotes` section exists.
 */

use crate::feed::document::{FeedDocument, XmlNode};
use crate::feed::extract::{attr_or_text, text};

const PROGRAM_SECTIONS: &[&str] = &["program"];
const CULTURE_SECTIONS: &[&str] = &["cultureNotes", "culture"];

/// Tag style of a culture note, derived from its free-text category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStyle {
    HandsOn,
    Culture101,
}

impl TagStyle {
    /// Any category containing "hands-on" (case-insensitive) is hands-on;
    /// everything else, including the empty string, is the default style.
    pub fn classify(category: &str) -> Self {
        if category.to_lowercase().contains("hands-on") {
            Self::HandsOn
        } else {
            Self::Culture101
        }
    }

    /// CSS class for the tag button
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::HandsOn => "hands-on",
            Self::Culture101 => "culture-101",
        }
    }
}

/// A stage program item
#[derive(Debug, Clone, Copy)]
pub struct ProgramEntry<'a> {
    node: &'a XmlNode,
    position: usize,
}

impl<'a> ProgramEntry<'a> {
    pub fn new(node: &'a XmlNode, position: usize) -> Self {
        Self { node, position }
    }

    /// Display number: the `number` attribute, or the 1-based position
    pub fn number(&self) -> String {
        match self.node.attr("number").map(str::trim) {
            Some(number) if !number.is_empty() => number.to_string(),
            _ => self.position.to_string(),
        }
    }

    pub fn performer(&self) -> String {
        attr_or_text(self.node, "performer")
    }

    pub fn genre(&self, lang: &str) -> String {
        text(self.node, "genre", lang)
    }

    pub fn title(&self, lang: &str) -> String {
        text(self.node, "title", lang)
    }

    pub fn bio(&self, lang: &str) -> String {
        text(self.node, "bio", lang)
    }

    pub fn node(&self) -> &'a XmlNode {
        self.node
    }
}

/// A culture note card
#[derive(Debug, Clone, Copy)]
pub struct CultureNote<'a> {
    node: &'a XmlNode,
}

impl<'a> CultureNote<'a> {
    pub fn new(node: &'a XmlNode) -> Self {
        Self { node }
    }

    pub fn category(&self) -> String {
        attr_or_text(self.node, "category")
    }

    pub fn tag_style(&self) -> TagStyle {
        TagStyle::classify(&self.category())
    }

    /// Explicit image URL, if the entry supplies one
    pub fn image(&self) -> Option<String> {
        let image = attr_or_text(self.node, "image");
        if image.is_empty() { None } else { Some(image) }
    }

    pub fn title(&self, lang: &str) -> String {
        text(self.node, "title", lang)
    }

    pub fn desc(&self, lang: &str) -> String {
        text(self.node, "desc", lang)
    }

    pub fn node(&self) -> &'a XmlNode {
        self.node
    }
}

/// Program items in document order
pub fn program_entries(doc: &FeedDocument) -> Vec<ProgramEntry<'_>> {
    doc.section(PROGRAM_SECTIONS)
        .map(|section| {
            section
                .children_named("item")
                .enumerate()
                .map(|(index, node)| ProgramEntry::new(node, index + 1))
                .collect()
        })
        .unwrap_or_default()
}

/// Culture notes in document order
pub fn culture_notes(doc: &FeedDocument) -> Vec<CultureNote<'_>> {
    doc.section(CULTURE_SECTIONS)
        .map(|section| {
            section
                .elements()
                .filter(|node| node.name() == "note" || node.name() == "item")
                .map(CultureNote::new)
                .collect()
        })
        .unwrap_or_default()
}
