/*!
 * Tests for card toggling, lazy reveal and theme switching over rendered feeds
 */

use festfeed::feed::parse_feed;
use festfeed::interaction::{
    CardState, InteractionController, InteractionSettings, IntersectionEntry, Layout, OPEN_CLASS, VISIBLE_CLASS, Viewport,
};
use festfeed::view::page::{NodeKind, Page, Section, Theme};
use festfeed::view::render::{RenderOptions, render_culture, render_programs};
use crate::common;

fn rendered_page() -> Page {
    let mut page = Page::new("Festival", "zh-Hans");
    page.add_section(Section::new("hero", Theme::Light));
    page.add_section(Section::new("program", Theme::Dark).with_container("program-list"));
    page.add_section(Section::new("culture", Theme::Light).with_container("culture-list"));

    let doc = parse_feed(common::FESTIVAL_FEED).unwrap();
    let options = RenderOptions::default();
    render_programs(&doc, &mut page, "program-list", &options);
    render_culture(&doc, &mut page, "culture-list", &options);
    page
}

fn culture_card(page: &Page) -> festfeed::view::page::NodeId {
    page.container("culture-list").unwrap().nodes()[0].id()
}

#[test]
fn test_cardClick_shouldToggleOpenFlag() {
    let mut page = rendered_page();
    let mut controller = InteractionController::default();
    controller.after_render(&page, &["program-list", "culture-list"]);

    let card = culture_card(&page);
    assert_eq!(controller.click(&mut page, card), Some(CardState::Expanded));
    assert!(page.node(card).unwrap().has_class(OPEN_CLASS));
    assert!(page.to_html().contains("data-expanded=\"true\""));

    assert_eq!(controller.click(&mut page, card), Some(CardState::Collapsed));
    assert!(!page.node(card).unwrap().has_class(OPEN_CLASS));
}

#[test]
fn test_programItemClick_shouldNotToggle() {
    let mut page = rendered_page();
    let mut controller = InteractionController::default();
    controller.after_render(&page, &["program-list", "culture-list"]);

    let item = page.container("program-list").unwrap().nodes()[0].id();
    assert_eq!(page.node(item).unwrap().kind(), NodeKind::ProgramItem);
    assert_eq!(controller.click(&mut page, item), None);
}

#[test]
fn test_cardClick_afterRerender_shouldStillWork() {
    let mut page = rendered_page();
    let mut controller = InteractionController::default();
    controller.after_render(&page, &["program-list", "culture-list"]);

    let doc = parse_feed(common::FESTIVAL_FEED).unwrap();
    render_culture(&doc, &mut page, "culture-list", &RenderOptions::default());
    controller.after_render(&page, &["program-list", "culture-list"]);

    let card = culture_card(&page);
    assert_eq!(controller.click(&mut page, card), Some(CardState::Expanded));
    assert_eq!(controller.cards().attached_count(), 2);
}

#[test]
fn test_scrollDown_shouldRevealMonotonically() {
    let mut page = rendered_page();
    let mut controller = InteractionController::default();
    controller.after_render(&page, &["program-list", "culture-list"]);
    assert_eq!(controller.reveal().observed_count(), 3);

    let layout = Layout::stacked(&page, 600.0, 300.0);
    let viewport = Viewport::new(0.0, 700.0);

    let mut revealed_total = 0;
    for offset in (0..=layout.height() as usize).step_by(100) {
        revealed_total += controller.scroll(&mut page, &viewport.scrolled_to(offset as f64), &layout).revealed.len();
    }
    assert_eq!(revealed_total, 3);
    assert_eq!(controller.reveal().observed_count(), 0);

    // Back to the top: nothing is hidden again
    controller.scroll(&mut page, &viewport, &layout);
    assert_eq!(page.nodes_with_class(VISIBLE_CLASS).len(), 3);
}

#[test]
fn test_scroll_shouldFollowSectionTheme() {
    let mut page = rendered_page();
    let mut controller = InteractionController::default();
    controller.after_render(&page, &["program-list", "culture-list"]);

    let layout = Layout::stacked(&page, 600.0, 300.0);
    let program_top = layout.sections[1].1.top;
    let viewport = Viewport::new(program_top, 700.0);

    let outcome = controller.scroll(&mut page, &viewport, &layout);
    assert_eq!(outcome.theme, Some(Theme::Dark));
    assert!(page.to_html().contains("<body class=\"dark-mode\">"));

    let outcome = controller.scroll(&mut page, &viewport.scrolled_to(0.0), &layout);
    assert_eq!(outcome.theme, Some(Theme::Light));
    assert!(page.to_html().contains("<body>"));
}

#[test]
fn test_themeObserver_withCustomThreshold_shouldUseIt() {
    let mut page = rendered_page();
    let settings = InteractionSettings {
        theme_threshold: 0.9,
        ..InteractionSettings::default()
    };
    let mut controller = InteractionController::new(settings);
    controller.after_render(&page, &["culture-list"]);

    let entries = vec![IntersectionEntry::new("program".to_string(), true, 0.5)];
    assert_eq!(controller.theme().handle(&mut page, &entries), None);
    let entries = vec![IntersectionEntry::new("program".to_string(), true, 0.95)];
    assert_eq!(controller.theme().handle(&mut page, &entries), Some(Theme::Dark));
}
