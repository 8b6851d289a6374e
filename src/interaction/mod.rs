/*!
 * Post-render interactions.
 *
 * - `cards`: delegated expand/collapse of culture cards
 * - `observers`: one-shot lazy reveal and ambient theme switching
 * - `viewport`: intersection geometry feeding the observers
 */

pub mod cards;
pub mod observers;
pub mod viewport;

use log::debug;
use serde::{Deserialize, Serialize};

pub use cards::{CardState, CardToggle, OPEN_CLASS};
pub use observers::{IntersectionEntry, RevealObserver, ThemeObserver, VISIBLE_CLASS};
pub use viewport::{Bounds, Layout, RootMargin, Viewport};

use crate::view::page::{NodeId, Page, Theme};

/// Observer tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionSettings {
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,

    /// Negative values shrink the root, so the reveal waits until the element is that far above the bottom edge
    #[serde(default = "default_reveal_margin_bottom")]
    pub reveal_margin_bottom: f64,

    #[serde(default = "default_theme_threshold")]
    pub theme_threshold: f64,
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_margin_bottom() -> f64 {
    -50.0
}

fn default_theme_threshold() -> f64 {
    0.15
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            reveal_threshold: default_reveal_threshold(),
            reveal_margin_bottom: default_reveal_margin_bottom(),
            theme_threshold: default_theme_threshold(),
        }
    }
}

/// What one scroll step changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollOutcome {
    pub revealed: Vec<NodeId>,
    pub theme: Option<Theme>,
}

/// Owns the card toggle and both observers for one page
#[derive(Debug, Clone)]
pub struct InteractionController {
    settings: InteractionSettings,
    cards: CardToggle,
    reveal: RevealObserver,
    theme: ThemeObserver,
}

impl InteractionController {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            settings,
            cards: CardToggle::new(),
            reveal: RevealObserver::new(settings.reveal_threshold),
            theme: ThemeObserver::new(settings.theme_threshold),
        }
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn cards(&self) -> &CardToggle {
        &self.cards
    }

    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    pub fn theme(&self) -> &ThemeObserver {
        &self.theme
    }

    /// Wire up interactions after a render pass.
    ///
    /// Containers already attached keep their single handler. Both observers
    /// are recreated over the current content.
    pub fn after_render(&mut self, page: &Page, container_ids: &[&str]) {
        for id in container_ids {
            self.cards.attach(page, id);
        }

        self.reveal = RevealObserver::new(self.settings.reveal_threshold);
        let lazy = self.reveal.observe_page(page);

        self.theme = ThemeObserver::new(self.settings.theme_threshold);
        let sections = self.theme.observe_page(page);

        debug!(
            "Interactions ready: {} card container(s), {} lazy node(s), {} section(s)",
            self.cards.attached_count(),
            lazy,
            sections
        );
    }

    pub fn click(&self, page: &mut Page, target: NodeId) -> Option<CardState> {
        self.cards.handle_click(page, target)
    }

    /// Deliver one round of observations for the given viewport
    pub fn scroll(&mut self, page: &mut Page, viewport: &Viewport, layout: &Layout) -> ScrollOutcome {
        let reveal_entries = viewport.entries(&layout.nodes, RootMargin::bottom(self.settings.reveal_margin_bottom));
        let revealed = self.reveal.handle(page, &reveal_entries);

        let theme_entries = viewport.entries(&layout.sections, RootMargin::default());
        let theme = self.theme.handle(page, &theme_entries);

        ScrollOutcome { revealed, theme }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}
