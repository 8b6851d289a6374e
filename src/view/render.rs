/*!
 * Feed-to-markup rendering.
 *
 * Every render function replaces the full content of its container, so
 * calling it twice with the same feed leaves exactly one node per entry.
 * A container id the page does not know is skipped and reported as `None`.
 */

use futures::future::join_all;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::feed::document::FeedDocument;
use crate::feed::entries::{culture_notes, program_entries, CultureNote, ProgramEntry, TagStyle};
use crate::providers::ImageSearch;
use crate::view::html::{escape_attr, escape_html};
use crate::view::page::{Fragment, NodeKind, Page};

/// Class marking nodes for the reveal observer
pub const LAZY_CLASS: &str = "lazy-load";

/// Presentation order of culture notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteOrder {
    #[default]
    Document,
    Shuffled,
}

/// Settings that shape the generated markup
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Language shown as the main line (e.g. "zh-Hans")
    pub primary_language: String,
    /// Language shown as the subtitle line (e.g. "en")
    pub secondary_language: String,
    /// Language of the title used as the image search query
    pub image_query_language: String,
    /// Image used when a note has none
    pub placeholder_image: String,
    /// Image swapped in by the page when an image fails to load
    pub broken_image: String,
    /// Label before the secondary-language performer bio
    pub bio_label: String,
    pub note_order: NoteOrder,
    /// Seed for reproducible shuffles
    pub shuffle_seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            primary_language: "zh-Hans".to_string(),
            secondary_language: "en".to_string(),
            image_query_language: "en".to_string(),
            placeholder_image: "https://placehold.co/600x400/f0f0f0/909090?text=Placeholder".to_string(),
            broken_image: "https://placehold.co/300x300/f0f0f0/909090?text=Image+Error".to_string(),
            bio_label: "Performer Bio:".to_string(),
            note_order: NoteOrder::Document,
            shuffle_seed: None,
        }
    }
}

/// Where a culture card's image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Feed,
    Placeholder,
    Search,
}

/// Owned view model of one culture card
#[derive(Debug, Clone, PartialEq)]
pub struct CultureCardView {
    pub title_primary: String,
    pub title_secondary: String,
    pub desc_primary: String,
    pub desc_secondary: String,
    /// Title in the image query language, used for image search
    pub query: String,
    pub category: String,
    pub style: TagStyle,
    pub image: String,
    pub image_source: ImageSource,
}

impl CultureCardView {
    pub fn from_note(note: &CultureNote<'_>, options: &RenderOptions) -> Self {
        let (image, image_source) = match note.image() {
            Some(url) => (url, ImageSource::Feed),
            None => (options.placeholder_image.clone(), ImageSource::Placeholder),
        };

        Self {
            title_primary: note.title(&options.primary_language),
            title_secondary: note.title(&options.secondary_language),
            desc_primary: note.desc(&options.primary_language),
            desc_secondary: note.desc(&options.secondary_language),
            query: note.title(&options.image_query_language),
            category: note.category(),
            style: note.tag_style(),
            image,
            image_source,
        }
    }
}

/// Markup for one program item
pub fn program_fragment(entry: &ProgramEntry<'_>, options: &RenderOptions) -> Fragment {
    let primary = &options.primary_language;
    let secondary = &options.secondary_language;

    let genres: Vec<String> = [entry.genre(primary), entry.genre(secondary)]
        .into_iter()
        .filter(|genre| !genre.is_empty())
        .map(|genre| escape_html(&genre))
        .collect();
    let genre_html = if genres.is_empty() {
        String::new()
    } else {
        format!("<p class=\"genre\">{}</p>", genres.join(" / "))
    };

    let bio_primary = entry.bio(primary);
    let bio_secondary = entry.bio(secondary);
    let mut bio_html = String::new();
    if !bio_primary.is_empty() || !bio_secondary.is_empty() {
        bio_html.push_str("<blockquote class=\"bio\">");
        if !bio_primary.is_empty() {
            bio_html.push_str(&format!(
                "<p class=\"primary-content\" lang=\"{}\">{}</p>",
                escape_attr(primary),
                escape_html(&bio_primary)
            ));
        }
        if !bio_secondary.is_empty() {
            bio_html.push_str(&format!(
                "<p class=\"sub\" lang=\"{}\"><strong>{}</strong> {}</p>",
                escape_attr(secondary),
                escape_html(&options.bio_label),
                escape_html(&bio_secondary)
            ));
        }
        bio_html.push_str("</blockquote>");
    }

    let inner = format!(
        "<div class=\"item-number\">{number}</div>\
         <div class=\"item-details\">\
         <h3 class=\"primary-content\" lang=\"{plang}\">{title_primary}<div class=\"sub\" lang=\"{slang}\">{title_secondary}</div></h3>\
         <p class=\"performer\">{performer}</p>{genre}{bio}</div>",
        number = escape_html(&entry.number()),
        plang = escape_attr(primary),
        slang = escape_attr(secondary),
        title_primary = escape_html(&entry.title(primary)),
        title_secondary = escape_html(&entry.title(secondary)),
        performer = escape_html(&entry.performer()),
        genre = genre_html,
        bio = bio_html,
    );

    Fragment::new(NodeKind::ProgramItem, "article")
        .class("program-item")
        .class("card")
        .class(LAZY_CLASS)
        .attr("data-number", entry.number())
        .inner(inner)
}

/// Render every program item of `doc` into `container_id`.
///
/// Returns the number of items rendered, or `None` when the container
/// does not exist.
pub fn render_programs(doc: &FeedDocument, page: &mut Page, container_id: &str, options: &RenderOptions) -> Option<usize> {
    let fragments: Vec<Fragment> = program_entries(doc)
        .iter()
        .map(|entry| program_fragment(entry, options))
        .collect();
    replace(page, container_id, fragments)
}

/// Card view models for every culture note, in document order
pub fn culture_cards(doc: &FeedDocument, options: &RenderOptions) -> Vec<CultureCardView> {
    culture_notes(doc)
        .iter()
        .map(|note| CultureCardView::from_note(note, options))
        .collect()
}

/// Look up images for cards that fell back to the placeholder.
///
/// All lookups run concurrently and are awaited together. A failed or empty
/// lookup keeps the placeholder. Returns the number of images substituted.
pub async fn enrich_images(cards: &mut [CultureCardView], search: &dyn ImageSearch) -> usize {
    let queries: Vec<(usize, String)> = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| card.image_source == ImageSource::Placeholder && !card.query.trim().is_empty())
        .map(|(index, card)| (index, card.query.clone()))
        .collect();

    if queries.is_empty() {
        return 0;
    }
    debug!("Looking up {} image(s)", queries.len());

    let results = join_all(queries.into_iter().map(|(index, query)| async move {
        let result = search.first_image(&query).await;
        (index, query, result)
    }))
    .await;

    let mut substituted = 0;
    for (index, query, result) in results {
        match result {
            Ok(Some(url)) => {
                cards[index].image = url;
                cards[index].image_source = ImageSource::Search;
                substituted += 1;
            }
            Ok(None) => debug!("No image found for '{}', keeping placeholder", query),
            Err(e) => warn!("Image lookup for '{}' failed, keeping placeholder: {}", query, e),
        }
    }
    substituted
}

/// Apply the configured presentation order (Fisher-Yates when shuffled)
pub fn order_cards<T>(cards: &mut [T], order: NoteOrder, seed: Option<u64>) {
    if order == NoteOrder::Document {
        return;
    }
    match seed {
        Some(seed) => cards.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => cards.shuffle(&mut rand::rng()),
    }
}

/// Inline handler that swaps a failed image for `fallback` once.
/// Quote and backslash are percent-encoded so the URL cannot leave the script string.
fn image_error_handler(fallback: &str) -> String {
    let url = fallback.replace('\\', "%5C").replace('\'', "%27");
    format!("this.onerror=null;this.src='{}';", url)
}

/// Markup for one culture card
pub fn culture_fragment(card: &CultureCardView, options: &RenderOptions) -> Fragment {
    let inner = format!(
        "<div class=\"card-header\">\
         <div class=\"card-image\"><img src=\"{image}\" alt=\"{alt}\" loading=\"lazy\" onerror=\"{on_error}\"></div>\
         <div class=\"card-content\"><h3 class=\"primary-content\" lang=\"{plang}\">{title_primary}<div class=\"sub\" lang=\"{slang}\">{title_secondary}</div></h3></div>\
         </div>\
         <div class=\"collapsible-content\"><div>\
         <p class=\"primary-content\" lang=\"{plang}\">{desc_primary}</p>\
         <p class=\"sub\" lang=\"{slang}\">{desc_secondary}</p>\
         </div></div>\
         <div class=\"tag-container\"><button class=\"tag-btn {style}\" type=\"button\">{category}</button></div>",
        image = escape_attr(&card.image),
        alt = escape_attr(&card.title_secondary),
        on_error = escape_attr(&image_error_handler(&options.broken_image)),
        plang = escape_attr(&options.primary_language),
        slang = escape_attr(&options.secondary_language),
        title_primary = escape_html(&card.title_primary),
        title_secondary = escape_html(&card.title_secondary),
        desc_primary = escape_html(&card.desc_primary),
        desc_secondary = escape_html(&card.desc_secondary),
        style = card.style.css_class(),
        category = escape_html(&card.category),
    );

    Fragment::new(NodeKind::CultureCard, "article")
        .class("card-with-image")
        .class(LAZY_CLASS)
        .attr("data-expanded", "false")
        .attr("data-tag", card.style.css_class())
        .inner(inner)
}

/// Render prepared culture cards into `container_id`, in slice order
pub fn render_culture_cards(cards: &[CultureCardView], page: &mut Page, container_id: &str, options: &RenderOptions) -> Option<usize> {
    let fragments: Vec<Fragment> = cards.iter().map(|card| culture_fragment(card, options)).collect();
    replace(page, container_id, fragments)
}

/// Render every culture note of `doc` into `container_id` without image
/// search, honoring the configured order
pub fn render_culture(doc: &FeedDocument, page: &mut Page, container_id: &str, options: &RenderOptions) -> Option<usize> {
    let mut cards = culture_cards(doc, options);
    order_cards(&mut cards, options.note_order, options.shuffle_seed);
    render_culture_cards(&cards, page, container_id, options)
}

/// Replace a container's content with a single message paragraph
pub fn render_message(page: &mut Page, container_id: &str, message: &str) -> Option<usize> {
    let fragment = Fragment::new(NodeKind::Message, "p")
        .class("feed-message")
        .attr("role", "alert")
        .inner(escape_html(message));
    replace(page, container_id, vec![fragment])
}

fn replace(page: &mut Page, container_id: &str, fragments: Vec<Fragment>) -> Option<usize> {
    let count = fragments.len();
    match page.replace_children(container_id, fragments) {
        Some(_) => {
            debug!("Rendered {} node(s) into #{}", count, container_id);
            Some(count)
        }
        None => {
            debug!("Container #{} not present, skipping", container_id);
            None
        }
    }
}
