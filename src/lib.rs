/*!
 * # festfeed - Festival feed renderer
 *
 * A Rust library that loads a festival's XML feed (stage program and
 * culture notes), renders it into bilingual page markup and drives the
 * page's cosmetic interactions.
 *
 * ## Features
 *
 * - Fetch the feed over HTTP, bypassing caches
 * - Repair bare ampersands before strict XML parsing
 * - Bilingual field lookup by `xml:lang`
 * - Program list and culture card rendering with idempotent re-render
 * - Optional image search for notes without an image
 * - Delegated card expand/collapse
 * - One-shot lazy reveal and section-driven dark/light theme
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: One render pass from fetch to interactions
 * - `feed`: Sanitizing, parsing and typed entry views
 * - `view`: Page model, markup rendering and failure messages
 * - `interaction`: Card toggle, reveal and theme observers, viewport geometry
 * - `providers`: Feed transport and image search clients (HTTP and mock)
 * - `language_utils`: BCP 47 language tag utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod feed;
pub mod interaction;
pub mod language_utils;
pub mod providers;
pub mod view;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunReport};
pub use errors::{AppError, ConfigError, FeedError, ImageLookupError};
pub use feed::{FeedDocument, FeedLoader, parse_feed};
pub use interaction::{InteractionController, InteractionSettings};
pub use language_utils::{get_language_name, language_tags_match};
pub use view::{Page, Theme};
