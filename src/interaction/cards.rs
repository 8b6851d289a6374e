/*!
 * Expand/collapse for culture cards.
 *
 * One delegated handler per container. Clicks are resolved against the
 * container's current content at click time, so the handler keeps working
 * after the content is replaced.
 */

use log::debug;
use std::collections::BTreeSet;

use crate::view::page::{NodeId, NodeKind, Page};

/// Class present on an expanded card
pub const OPEN_CLASS: &str = "open";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Default)]
pub struct CardToggle {
    containers: BTreeSet<String>,
}

impl CardToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the delegated handler to a container.
    ///
    /// Returns false when the container does not exist or is already
    /// attached; attaching twice never doubles the handler.
    pub fn attach(&mut self, page: &Page, container_id: &str) -> bool {
        if page.container(container_id).is_none() {
            debug!("Container #{} not present, card toggle not attached", container_id);
            return false;
        }
        self.containers.insert(container_id.to_string())
    }

    pub fn is_attached(&self, container_id: &str) -> bool {
        self.containers.contains(container_id)
    }

    pub fn attached_count(&self) -> usize {
        self.containers.len()
    }

    /// Current state of a card, read from its flags
    pub fn state(page: &Page, target: NodeId) -> Option<CardState> {
        let node = page.node(target)?;
        if node.kind() != NodeKind::CultureCard {
            return None;
        }
        Some(if node.has_class(OPEN_CLASS) {
            CardState::Expanded
        } else {
            CardState::Collapsed
        })
    }

    /// Dispatch a click; returns the card's new state when the click toggled one
    pub fn handle_click(&self, page: &mut Page, target: NodeId) -> Option<CardState> {
        let container = page.container_of(target)?;
        if !self.containers.contains(container) {
            return None;
        }

        let node = page.node_mut(target)?;
        if node.kind() != NodeKind::CultureCard {
            return None;
        }

        let expanded = !node.has_class(OPEN_CLASS);
        node.set_class(OPEN_CLASS, expanded);
        node.set_attr("data-expanded", expanded.to_string());

        Some(if expanded {
            CardState::Expanded
        } else {
            CardState::Collapsed
        })
    }
}
