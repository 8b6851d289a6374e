/*!
 * Rendering of the feed into the page.
 *
 * - `page`: owned page model (containers, sections, theme, node flags)
 * - `render`: program/culture markup and container replacement
 * - `messages`: localized failure messages
 * - `html`: escaping helpers
 */

pub mod html;
pub mod messages;
pub mod page;
pub mod render;

pub use page::{Container, Fragment, Node, NodeId, NodeKind, Page, Section, Theme};
pub use render::{CultureCardView, ImageSource, NoteOrder, RenderOptions};
