/*!
 * Viewport observers.
 *
 * Each observer is the single writer of one piece of view state:
 * `RevealObserver` owns the `visible` flag of lazy nodes and
 * `ThemeObserver` owns the page theme. They share nothing.
 */

use log::{debug, trace};
use std::collections::BTreeSet;

use crate::view::page::{NodeId, Page, Theme};
use crate::view::render::LAZY_CLASS;

/// Class added to a node once it has been revealed
pub const VISIBLE_CLASS: &str = "visible";

/// One observation delivered to an observer
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<T> {
    pub target: T,
    pub is_intersecting: bool,
    /// Visible fraction of the target, 0.0 to 1.0
    pub ratio: f64,
}

impl<T> IntersectionEntry<T> {
    pub fn new(target: T, is_intersecting: bool, ratio: f64) -> Self {
        Self { target, is_intersecting, ratio }
    }

    fn qualifies(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// One-shot lazy reveal
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    observed: BTreeSet<NodeId>,
}

impl RevealObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: BTreeSet::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn observe(&mut self, id: NodeId) {
        self.observed.insert(id);
    }

    /// Observe every lazy node on the page that is not visible yet
    pub fn observe_page(&mut self, page: &Page) -> usize {
        let mut added = 0;
        for id in page.nodes_with_class(LAZY_CLASS) {
            let visible = page.node(id).is_some_and(|node| node.has_class(VISIBLE_CLASS));
            if !visible && self.observed.insert(id) {
                added += 1;
            }
        }
        added
    }

    pub fn unobserve(&mut self, id: NodeId) {
        self.observed.remove(&id);
    }

    pub fn is_observing(&self, id: NodeId) -> bool {
        self.observed.contains(&id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Handle a batch of entries; returns the nodes revealed by it.
    ///
    /// A revealed node is unobserved immediately, so later entries for it
    /// (including ones reporting it has left the viewport) are ignored.
    pub fn handle(&mut self, page: &mut Page, entries: &[IntersectionEntry<NodeId>]) -> Vec<NodeId> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !self.is_observing(entry.target) || !entry.qualifies(self.threshold) {
                continue;
            }
            // Nodes replaced by a later render pass no longer resolve
            if let Some(node) = page.node_mut(entry.target) {
                node.set_class(VISIBLE_CLASS, true);
                revealed.push(entry.target);
            }
            self.unobserve(entry.target);
        }
        if !revealed.is_empty() {
            trace!("Revealed {} node(s)", revealed.len());
        }
        revealed
    }
}

/// Ambient theme switching by section
#[derive(Debug, Clone)]
pub struct ThemeObserver {
    threshold: f64,
    sections: Vec<(String, Theme)>,
}

impl ThemeObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            sections: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn observe(&mut self, section_id: impl Into<String>, theme: Theme) {
        let section_id = section_id.into();
        match self.sections.iter_mut().find(|(id, _)| *id == section_id) {
            Some(existing) => existing.1 = theme,
            None => self.sections.push((section_id, theme)),
        }
    }

    /// Observe every themed section of the page
    pub fn observe_page(&mut self, page: &Page) -> usize {
        for section in page.sections() {
            self.observe(section.id.clone(), section.theme);
        }
        self.sections.len()
    }

    pub fn observed_count(&self) -> usize {
        self.sections.len()
    }

    fn theme_of(&self, section_id: &str) -> Option<Theme> {
        self.sections
            .iter()
            .find(|(id, _)| id == section_id)
            .map(|(_, theme)| *theme)
    }

    /// Handle a batch of entries; returns the theme applied, if any.
    ///
    /// When several sections qualify in one batch the first qualifying entry
    /// wins. The order is that of the batch, not of the page.
    pub fn handle(&self, page: &mut Page, entries: &[IntersectionEntry<String>]) -> Option<Theme> {
        let theme = entries
            .iter()
            .filter(|entry| entry.qualifies(self.threshold))
            .find_map(|entry| self.theme_of(&entry.target))?;

        if page.set_theme(theme) {
            debug!("Ambient theme switched to {}", theme);
        }
        Some(theme)
    }
}
