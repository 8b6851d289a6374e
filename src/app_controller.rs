use log::{debug, error, info};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::{AppError, FeedError};
use crate::feed::{culture_notes, program_entries, FeedDocument, FeedLoader};
use crate::interaction::InteractionController;
use crate::providers::http::HttpFeedSource;
use crate::providers::image_search::HttpImageSearch;
use crate::providers::{FeedSource, ImageSearch};
use crate::view::messages::failure_messages;
use crate::view::page::{Page, Section, Theme};
use crate::view::render::{culture_cards, enrich_images, order_cards, render_culture_cards, render_message, render_programs};

// @module: Application controller for the feed render pass

/// Outcome of one render pass
#[derive(Debug, Default)]
pub struct RunReport {
    /// Program entries rendered
    pub programs: usize,
    /// Culture notes rendered
    pub notes: usize,
    /// Placeholders replaced by image search results
    pub images_found: usize,
    /// The load failure, when the pass fell back to messages
    pub error: Option<FeedError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Main application controller: load the feed, render it, wire interactions
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    loader: FeedLoader,
    image_search: Option<Arc<dyn ImageSearch>>,
    interaction: InteractionController,
}

impl Controller {
    // @method: Validate the configuration and build HTTP collaborators from it
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let source: Arc<dyn FeedSource> = Arc::new(HttpFeedSource::new(config.feed.timeout_secs));
        let image_search: Option<Arc<dyn ImageSearch>> = if config.image_search.enabled {
            Some(Arc::new(HttpImageSearch::new(
                config.image_search.endpoint.clone(),
                config.image_search.api_key.clone(),
                config.image_search.timeout_secs,
            )))
        } else {
            None
        };
        Ok(Self::with_sources(config, source, image_search))
    }

    /// Create a controller around explicit collaborators
    pub fn with_sources(config: Config, source: Arc<dyn FeedSource>, image_search: Option<Arc<dyn ImageSearch>>) -> Self {
        let interaction = InteractionController::new(config.interaction);
        Self {
            config,
            loader: FeedLoader::new(source),
            image_search,
            interaction,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionController {
        &mut self.interaction
    }

    /// Page skeleton: a light hero, the dark program section and the light
    /// culture section, each list section owning its container
    pub fn build_page(&self) -> Page {
        let page_config = &self.config.page;
        let mut page = Page::new(page_config.title.clone(), page_config.primary_language.clone());
        page.add_section(Section::new("hero", Theme::Light).with_heading(page_config.title.clone()));
        page.add_section(
            Section::new("program", Theme::Dark)
                .with_heading("节目单 Program")
                .with_container(page_config.program_container.clone()),
        );
        page.add_section(
            Section::new("culture", Theme::Light)
                .with_heading("文化小知识 Culture Notes")
                .with_container(page_config.culture_container.clone()),
        );
        page
    }

    /// Fetch and parse the configured feed
    pub async fn load(&self) -> Result<FeedDocument, FeedError> {
        debug!("Loading feed from {}", self.config.feed.url);
        self.loader.load(&self.config.feed.url).await
    }

    /// Run one full render pass into `page`.
    ///
    /// A load failure replaces both containers with a localized message and
    /// renders no entries at all.
    pub async fn run(&mut self, page: &mut Page) -> RunReport {
        let report = match self.load().await {
            Ok(document) => self.render(&document, page).await,
            Err(e) => {
                error!("Feed could not be loaded: {}", e);
                self.render_failure(&e, page);
                RunReport {
                    error: Some(e),
                    ..RunReport::default()
                }
            }
        };

        let containers = self.config.container_ids();
        self.interaction.after_render(page, &containers);
        report
    }

    /// Render an already loaded document
    pub async fn render(&self, document: &FeedDocument, page: &mut Page) -> RunReport {
        let options = self.config.render_options();
        let page_config = &self.config.page;

        let programs = render_programs(document, page, &page_config.program_container, &options).unwrap_or(0);

        let mut cards = culture_cards(document, &options);
        let images_found = match &self.image_search {
            Some(search) => enrich_images(&mut cards, search.as_ref()).await,
            None => 0,
        };
        order_cards(&mut cards, options.note_order, options.shuffle_seed);
        let notes = render_culture_cards(&cards, page, &page_config.culture_container, &options).unwrap_or(0);

        info!("Rendered {} program item(s) and {} culture note(s)", programs, notes);
        RunReport {
            programs,
            notes,
            images_found,
            error: None,
        }
    }

    fn render_failure(&self, error: &FeedError, page: &mut Page) {
        let messages = failure_messages(error, &self.config.page.ui_language);
        render_message(page, &self.config.page.program_container, messages.program);
        render_message(page, &self.config.page.culture_container, messages.culture);
    }

    /// Load the feed and count its entries without rendering
    pub async fn check(&self) -> Result<(usize, usize), AppError> {
        let document = self.load().await?;
        Ok((program_entries(&document).len(), culture_notes(&document).len()))
    }
}

/// Write a page snapshot to a file
pub fn write_page(page: &Page, path: &Path) -> Result<(), AppError> {
    std::fs::write(path, page.to_html())?;
    info!("Page written to {}", path.display());
    Ok(())
}
