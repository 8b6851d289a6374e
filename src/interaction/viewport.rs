/*!
 * Viewport geometry.
 *
 * Computes intersection entries the way a browser intersection observer
 * reports them, from vertical element bounds, the scroll offset and a root
 * margin, so scroll-driven behavior can be exercised without a browser.
 */

use crate::interaction::observers::IntersectionEntry;
use crate::view::page::{NodeId, Page};

/// Vertical extent of an element in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height: height.max(0.0) }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Margins that grow (positive) or shrink (negative) the root box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f64,
    pub bottom: f64,
}

impl RootMargin {
    pub fn bottom(bottom: f64) -> Self {
        Self { top: 0.0, bottom }
    }
}

/// The visible window onto the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }

    /// Same viewport scrolled to a new offset
    pub fn scrolled_to(&self, scroll_top: f64) -> Self {
        Self { scroll_top, ..*self }
    }

    /// Intersection of `bounds` with the root box: (is_intersecting, ratio)
    pub fn intersect(&self, bounds: Bounds, margin: RootMargin) -> (bool, f64) {
        let root_top = self.scroll_top - margin.top;
        let root_bottom = self.scroll_top + self.height + margin.bottom;
        if root_bottom <= root_top {
            return (false, 0.0);
        }

        let overlap = bounds.bottom().min(root_bottom) - bounds.top.max(root_top);
        let touching = bounds.top <= root_bottom && bounds.bottom() >= root_top;

        if bounds.height == 0.0 {
            return if touching { (true, 1.0) } else { (false, 0.0) };
        }

        let ratio = (overlap.max(0.0) / bounds.height).clamp(0.0, 1.0);
        (touching, ratio)
    }

    /// One entry per target, in layout order
    pub fn entries<T: Clone>(&self, targets: &[(T, Bounds)], margin: RootMargin) -> Vec<IntersectionEntry<T>> {
        targets
            .iter()
            .map(|(target, bounds)| {
                let (is_intersecting, ratio) = self.intersect(*bounds, margin);
                IntersectionEntry {
                    target: target.clone(),
                    is_intersecting,
                    ratio,
                }
            })
            .collect()
    }
}

/// Vertical positions of sections and rendered nodes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub sections: Vec<(String, Bounds)>,
    pub nodes: Vec<(NodeId, Bounds)>,
}

impl Layout {
    /// Stack sections top to bottom, each as tall as its padding plus its
    /// container's nodes at `node_height` apiece.
    pub fn stacked(page: &Page, section_padding: f64, node_height: f64) -> Self {
        let mut layout = Self::default();
        let mut cursor = 0.0;

        for section in page.sections() {
            let top = cursor;
            cursor += section_padding;

            if let Some(container) = section.container.as_deref().and_then(|id| page.container(id)) {
                for node in container.nodes() {
                    layout.nodes.push((node.id(), Bounds::new(cursor, node_height)));
                    cursor += node_height;
                }
            }

            cursor += section_padding;
            layout.sections.push((section.id.clone(), Bounds::new(top, cursor - top)));
        }

        layout
    }

    /// Total height of the laid-out page
    pub fn height(&self) -> f64 {
        self.sections
            .iter()
            .map(|(_, bounds)| bounds.bottom())
            .chain(self.nodes.iter().map(|(_, bounds)| bounds.bottom()))
            .fold(0.0, f64::max)
    }
}
