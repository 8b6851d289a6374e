/*!
 * In-memory page model.
 *
 * A `Page` owns the named containers the renderer fills, the themed
 * sections the theme observer watches, and the page-wide ambient theme.
 * Rendered nodes belong to their container and are replaced wholesale on
 * every render pass; node ids are never reused, so a stale id simply stops
 * resolving.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::view::html::{escape_attr, escape_html};

/// Stable identity of a rendered node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// What a rendered node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    ProgramItem,
    CultureCard,
    Message,
}

/// Page-wide ambient theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Class set on the body for this theme, if any
    pub fn body_class(&self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark-mode"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markup produced by the renderer, not yet owned by a page
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: NodeKind,
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub inner_html: String,
}

impl Fragment {
    pub fn new(kind: NodeKind, tag: &'static str) -> Self {
        Self {
            kind,
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            inner_html: String::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.push((key.to_string(), value.into()));
        self
    }

    pub fn inner(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }
}

/// A rendered node owned by a container
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    inner_html: String,
}

impl Node {
    fn from_fragment(id: NodeId, fragment: Fragment) -> Self {
        Self {
            id,
            kind: fragment.kind,
            tag: fragment.tag,
            classes: fragment.classes,
            attrs: fragment.attrs,
            inner_html: fragment.inner_html,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Add or remove a class; returns whether the class is now present
    pub fn set_class(&mut self, class: &str, present: bool) -> bool {
        let has = self.has_class(class);
        if present && !has {
            self.classes.push(class.to_string());
        } else if !present && has {
            self.classes.retain(|c| c != class);
        }
        present
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Serialize the node with its current classes and attributes
    pub fn outer_html(&self) -> String {
        let mut out = format!("<{} data-node=\"{}\"", self.tag, self.id);
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_attr(&self.classes.join(" "))));
        }
        for (key, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
        }
        out.push('>');
        out.push_str(&self.inner_html);
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

/// A named element whose content the renderer owns
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    id: String,
    tag: &'static str,
    nodes: Vec<Node>,
    render_passes: u64,
}

impl Container {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of times the content has been replaced
    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    /// Serialized content, without the container element itself
    pub fn inner_html(&self) -> String {
        self.nodes.iter().map(Node::outer_html).collect::<Vec<_>>().join("\n")
    }
}

/// A page section tagged with an ambient theme
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub theme: Theme,
    pub heading: String,
    /// Container rendered inside this section, if any
    pub container: Option<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, theme: Theme) -> Self {
        Self {
            id: id.into(),
            theme,
            heading: String::new(),
            container: None,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }
}

/// The whole page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    title: String,
    lang: String,
    sections: Vec<Section>,
    containers: Vec<Container>,
    theme: Theme,
    next_node: u64,
}

impl Page {
    pub fn new(title: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lang: lang.into(),
            ..Default::default()
        }
    }

    /// Add a section; a container named by the section is created with it
    pub fn add_section(&mut self, section: Section) -> &mut Self {
        if let Some(container) = &section.container {
            self.add_container(container.clone(), "div");
        }
        self.sections.push(section);
        self
    }

    /// Add an empty container; adding an existing id is a no-op
    pub fn add_container(&mut self, id: impl Into<String>, tag: &'static str) -> &mut Self {
        let id = id.into();
        if self.container(&id).is_none() {
            self.containers.push(Container {
                id,
                tag,
                nodes: Vec::new(),
                render_passes: 0,
            });
        }
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|container| container.id == id)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set the ambient theme; returns true when it changed
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        let changed = self.theme != theme;
        self.theme = theme;
        changed
    }

    /// Replace the whole content of a container.
    ///
    /// Returns the ids of the new nodes, or `None` when the page has no
    /// container with that id (a no-op, not an error).
    pub fn replace_children(&mut self, container_id: &str, fragments: Vec<Fragment>) -> Option<Vec<NodeId>> {
        let start = self.next_node;
        let container = self.containers.iter_mut().find(|container| container.id == container_id)?;

        let nodes: Vec<Node> = fragments
            .into_iter()
            .enumerate()
            .map(|(offset, fragment)| Node::from_fragment(NodeId(start + offset as u64), fragment))
            .collect();
        let ids = nodes.iter().map(Node::id).collect();

        self.next_node = start + nodes.len() as u64;
        container.nodes = nodes;
        container.render_passes += 1;
        Some(ids)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.containers.iter().flat_map(|c| c.nodes.iter()).find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.containers.iter_mut().flat_map(|c| c.nodes.iter_mut()).find(|node| node.id == id)
    }

    /// Id of the container currently holding `id`
    pub fn container_of(&self, id: NodeId) -> Option<&str> {
        self.containers
            .iter()
            .find(|container| container.nodes.iter().any(|node| node.id == id))
            .map(|container| container.id.as_str())
    }

    /// Ids of every live node carrying `class`, in page order
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.containers
            .iter()
            .flat_map(|c| c.nodes.iter())
            .filter(|node| node.has_class(class))
            .map(Node::id)
            .collect()
    }

    /// Serialize a full HTML snapshot of the page
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n", escape_attr(&self.lang)));
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n</head>\n", escape_html(&self.title)));
        match self.theme.body_class() {
            Some(class) => out.push_str(&format!("<body class=\"{}\">\n", class)),
            None => out.push_str("<body>\n"),
        }

        for section in &self.sections {
            out.push_str(&format!(
                "<section id=\"{}\" data-theme=\"{}\">\n",
                escape_attr(&section.id),
                section.theme
            ));
            if !section.heading.is_empty() {
                out.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.heading)));
            }
            if let Some(container) = section.container.as_deref().and_then(|id| self.container(id)) {
                out.push_str(&self.container_html(container));
            }
            out.push_str("</section>\n");
        }

        // Containers that no section claims are appended after the sections
        for container in &self.containers {
            let claimed = self.sections.iter().any(|s| s.container.as_deref() == Some(container.id.as_str()));
            if !claimed {
                out.push_str(&self.container_html(container));
            }
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn container_html(&self, container: &Container) -> String {
        format!(
            "<{tag} id=\"{id}\">\n{inner}\n</{tag}>\n",
            tag = container.tag,
            id = escape_attr(&container.id),
            inner = container.inner_html()
        )
    }
}
