/*!
 * End-to-end tests: fetch, parse, render and fall back to messages
 */

use std::sync::Arc;
use festfeed::app_config::Config;
use festfeed::app_controller::Controller;
use festfeed::errors::{AppError, FeedError};
use festfeed::providers::mock::{MockFeedSource, MockImageSearch};
use festfeed::providers::{FeedSource, ImageSearch};
use festfeed::view::page::NodeKind;
use festfeed::view::render::NoteOrder;
use crate::common;

fn controller(source: MockFeedSource, search: Option<MockImageSearch>) -> Controller {
    let source: Arc<dyn FeedSource> = Arc::new(source);
    let search = search.map(|search| Arc::new(search) as Arc<dyn ImageSearch>);
    Controller::with_sources(Config::default(), source, search)
}

#[tokio::test]
async fn test_run_withValidFeed_shouldRenderProgramsAndNotes() {
    common::init_logging();
    let mut controller = controller(MockFeedSource::ok(common::FESTIVAL_FEED), None);
    let mut page = controller.build_page();

    let report = controller.run(&mut page).await;
    assert!(report.is_success());
    assert_eq!(report.programs, 2);
    assert_eq!(report.notes, 1);

    let programs = page.container("program-list").unwrap();
    assert_eq!(programs.count_kind(NodeKind::ProgramItem), 2);
    assert!(programs.inner_html().contains("Rivers &amp; Mountains Ensemble"));

    let culture = page.container("culture-list").unwrap();
    assert_eq!(culture.count_kind(NodeKind::CultureCard), 1);
    assert_eq!(culture.nodes()[0].attr("data-tag"), Some("hands-on"));
}

#[tokio::test]
async fn test_run_withHttp500_shouldRenderMessagesOnly() {
    let mut controller = controller(MockFeedSource::status(500, "oops"), None);
    let mut page = controller.build_page();

    let report = controller.run(&mut page).await;
    assert_eq!(report.programs, 0);
    assert_eq!(report.notes, 0);
    assert!(matches!(report.error, Some(FeedError::Network { status: Some(500), .. })));

    for id in ["program-list", "culture-list"] {
        let container = page.container(id).unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(container.count_kind(NodeKind::Message), 1);
    }
    assert!(page.container("program-list").unwrap().inner_html().contains("program list"));
    assert!(page.container("culture-list").unwrap().inner_html().contains("culture notes"));
}

#[tokio::test]
async fn test_run_withMalformedFeed_shouldRenderParseMessage() {
    let mut controller = controller(MockFeedSource::ok(common::MALFORMED_FEED), None);
    let mut page = controller.build_page();

    let report = controller.run(&mut page).await;
    assert!(report.error.as_ref().is_some_and(FeedError::is_parse));
    assert!(page.container("program-list").unwrap().inner_html().contains("malformed"));
}

#[tokio::test]
async fn test_run_withUnreachableFeed_shouldRenderNetworkMessage() {
    let mut controller = controller(MockFeedSource::unreachable(), None);
    let mut page = controller.build_page();

    let report = controller.run(&mut page).await;
    assert!(matches!(report.error, Some(FeedError::Network { status: None, .. })));
    assert_eq!(page.container("culture-list").unwrap().count_kind(NodeKind::CultureCard), 0);
}

#[tokio::test]
async fn test_runTwice_shouldReplaceNotAppend() {
    let source = MockFeedSource::ok(common::FESTIVAL_FEED);
    let mut controller = controller(source.clone(), None);
    let mut page = controller.build_page();

    controller.run(&mut page).await;
    controller.run(&mut page).await;

    assert_eq!(source.request_count(), 2);
    let programs = page.container("program-list").unwrap();
    assert_eq!(programs.len(), 2);
    assert_eq!(programs.render_passes(), 2);
}

#[tokio::test]
async fn test_run_withImageSearch_shouldFillMissingImage() {
    let search = MockImageSearch::working();
    let mut controller = controller(MockFeedSource::ok(common::FESTIVAL_FEED), Some(search.clone()));
    let mut page = controller.build_page();

    let report = controller.run(&mut page).await;
    assert_eq!(report.images_found, 1);
    assert_eq!(search.queries(), vec!["Paper Cutting".to_string()]);
    assert!(page.to_html().contains(&MockImageSearch::url_for("Paper Cutting")));
}

#[tokio::test]
async fn test_run_withFailingImageSearch_shouldStillRender() {
    let mut controller = controller(MockFeedSource::ok(common::FESTIVAL_FEED), Some(MockImageSearch::failing()));
    let mut page = controller.build_page();

    let report = controller.run(&mut page).await;
    assert!(report.is_success());
    assert_eq!(report.notes, 1);
    assert_eq!(report.images_found, 0);
}

#[tokio::test]
async fn test_run_withSeededShuffle_shouldBeReproducible() {
    let feed = r#"<festival><cultureNotes>
        <note category="a"><title xml:lang="en">One</title></note>
        <note category="b"><title xml:lang="en">Two</title></note>
        <note category="c"><title xml:lang="en">Three</title></note>
        <note category="d"><title xml:lang="en">Four</title></note>
        <note category="e"><title xml:lang="en">Five</title></note>
    </cultureNotes></festival>"#;

    let mut config = Config::default();
    config.notes.order = NoteOrder::Shuffled;
    config.notes.seed = Some(11);

    let mut snapshots = Vec::new();
    for _ in 0..2 {
        let mut controller = Controller::with_sources(config.clone(), Arc::new(MockFeedSource::ok(feed)), None);
        let mut page = controller.build_page();
        controller.run(&mut page).await;
        let tags: Vec<String> = page
            .container("culture-list")
            .unwrap()
            .nodes()
            .iter()
            .map(|node| node.inner_html().to_string())
            .collect();
        assert_eq!(tags.len(), 5);
        snapshots.push(tags);
    }
    assert_eq!(snapshots[0], snapshots[1]);
}

#[tokio::test]
async fn test_check_shouldCountEntries() {
    let controller = controller(MockFeedSource::ok(common::FESTIVAL_FEED), None);
    assert_eq!(controller.check().await.unwrap(), (2, 1));
}

#[tokio::test]
async fn test_check_withHttp503_shouldWrapFeedError() {
    let controller = controller(MockFeedSource::status(503, ""), None);
    let error = controller.check().await.unwrap_err();
    assert!(matches!(error, AppError::Feed(FeedError::Network { status: Some(503), .. })));
}
