/*!
 * Festival feed: loading, sanitizing, parsing and field lookup.
 *
 * - `sanitize`: bare-ampersand repair applied before parsing
 * - `document`: owned XML tree with well-formedness checks
 * - `loader`: fetch + sanitize + parse
 * - `extract`: bilingual field lookup
 * - `entries`: typed views over program items and culture notes
 */

pub mod document;
pub mod entries;
pub mod extract;
pub mod loader;
pub mod sanitize;

pub use document::{FeedDocument, XmlNode};
pub use entries::{CultureNote, ProgramEntry, TagStyle, culture_notes, program_entries};
pub use loader::{FeedLoader, parse_feed};
