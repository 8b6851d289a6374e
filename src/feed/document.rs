/*!
 * Owned XML tree for a single render pass.
 *
 * The tree is built from quick-xml events and checked for
 * well-formedness on the way: mismatched or unclosed elements, a missing
 * root, more than one root, stray text outside the root, undecodable
 * entities and nesting beyond `MAX_DEPTH` are all reported as
 * `FeedError::Parse`.
 */

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::FeedError;

/// Deepest element nesting a feed may use; tree walks are recursive
pub const MAX_DEPTH: usize = 256;

/// A child of an element: either a nested element or a run of text
#[derive(Debug, Clone, PartialEq)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
}

/// A single XML element with its attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlChild>,
}

impl XmlNode {
    /// Create an empty element, mostly useful for building trees in tests
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute (builder style)
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element (builder style)
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(XmlChild::Element(child));
        self
    }

    /// Add a text run (builder style)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlChild::Text(text.into()));
        self
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, FeedError> {
        let mut node = Self::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
        for attr in start.attributes() {
            let attr = attr.map_err(|e| FeedError::Parse(format!("Invalid attribute in <{}>: {}", node.name, e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| FeedError::Parse(format!("Invalid attribute value for {}: {}", key, e)))?
                .into_owned();
            node.attributes.push((key, value));
        }
        Ok(node)
    }

    /// Element name, including any prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Language tag of this element: `xml:lang`, or a bare `lang`
    pub fn lang(&self) -> Option<&str> {
        self.attr("xml:lang").or_else(|| self.attr("lang"))
    }

    /// Direct child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            XmlChild::Text(_) => None,
        })
    }

    /// First direct child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.elements().find(|node| node.name == name)
    }

    /// Direct child elements with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.elements().filter(move |node| node.name == name)
    }

    /// All descendant elements with the given name, depth first in
    /// document order. The node itself is not included.
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        for node in self.elements() {
            if node.name == name {
                found.push(node);
            }
            node.collect_descendants(name, found);
        }
    }

    /// Concatenated text of this element and all of its descendants,
    /// trimmed at both ends
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlChild::Text(text) => out.push_str(text),
                XmlChild::Element(node) => node.collect_text(out),
            }
        }
    }
}

/// A parsed feed document
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    root: XmlNode,
}

impl FeedDocument {
    /// Wrap an already-built tree
    pub fn from_root(root: XmlNode) -> Self {
        Self { root }
    }

    /// Parse XML text into a document.
    ///
    /// The text is expected to be sanitized already; see
    /// `feed::sanitize::sanitize_entities`.
    pub fn parse(xml: &str) -> Result<Self, FeedError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(FeedError::Parse("Content after the root element".to_string()));
                    }
                    if stack.len() >= MAX_DEPTH {
                        return Err(FeedError::Parse(format!("Elements nested deeper than {} levels", MAX_DEPTH)));
                    }
                    stack.push(XmlNode::from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = XmlNode::from_start(e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| FeedError::Parse("Unexpected closing tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| FeedError::Parse(format!("Invalid text content: {}", err)))?
                        .into_owned();
                    push_text(&mut stack, text)?;
                }
                Ok(Event::CData(ref e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    push_text(&mut stack, text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FeedError::Parse(format!(
                        "{} at position {}",
                        e,
                        reader.buffer_position()
                    )))
                }
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(FeedError::Parse(format!("Unclosed element <{}>", open.name)));
        }

        root.map(Self::from_root)
            .ok_or_else(|| FeedError::Parse("Document has no root element".to_string()))
    }

    /// The document element
    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    /// First section element with one of the given names, searched
    /// anywhere below (and including) the root
    pub fn section(&self, names: &[&str]) -> Option<&XmlNode> {
        names.iter().find_map(|name| {
            if self.root.name() == *name {
                Some(&self.root)
            } else {
                self.root.descendants(name).into_iter().next()
            }
        })
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<(), FeedError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlChild::Element(node));
        Ok(())
    } else if root.is_none() {
        *root = Some(node);
        Ok(())
    } else {
        Err(FeedError::Parse("Multiple root elements".to_string()))
    }
}

fn push_text(stack: &mut [XmlNode], text: String) -> Result<(), FeedError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlChild::Text(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(FeedError::Parse("Text outside the root element".to_string())),
    }
}
