use super::*;
use crate::{
    fixtures::{raw_batch, raw_profile},
    BatchSize, FeedController, FetchError,
};

fn feed_panel(controller: &FeedController) -> FeedPanel {
    match render_feed(controller.state()) {
        FeedView::Feed(panel) => panel,
        FeedView::Loading => panic!("expected feed mode"),
    }
}

fn loaded(count: u32) -> FeedController {
    let mut controller = FeedController::new(BatchSize::default());
    controller.initialize().expect("initial");
    controller.complete_fetch(Ok(raw_batch(0, count)));
    controller
}

#[test]
fn idle_empty_feed_renders_feed_mode() {
    let controller = FeedController::new(BatchSize::default());
    let panel = feed_panel(&controller);
    assert!(panel.cards.is_empty());
    assert_eq!(panel.load_more.label, LOAD_MORE_LABEL);
    assert!(panel.load_more.enabled);
    assert_eq!(panel.status_line, "0 profiles loaded");
}

#[test]
fn cards_follow_list_order_with_position_keys() {
    let controller = loaded(3);
    let panel = feed_panel(&controller);

    let keys: Vec<&str> = panel.cards.iter().map(|card| card.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "00000000-0000-0000-0000-000000000001-0",
            "00000000-0000-0000-0000-000000000002-1",
            "00000000-0000-0000-0000-000000000003-2",
        ]
    );

    let first = &panel.cards[0];
    assert_eq!(first.display_name, "First0 Last0");
    assert_eq!(first.email, "user0@example.com");
    assert_eq!(
        first.picture_url,
        "https://randomuser.me/api/portraits/med/women/0.jpg"
    );
    assert_eq!(first.location.as_deref(), Some("City0, Norway"));
    assert!(panel.status_line.starts_with("3 profiles loaded, last updated "));
}

#[test]
fn duplicate_upstream_ids_still_get_distinct_keys() {
    let mut controller = FeedController::new(BatchSize::default());
    controller.initialize().expect("initial");
    controller.complete_fetch(Ok(vec![raw_profile(7), raw_profile(7)]));

    let panel = feed_panel(&controller);
    assert_eq!(panel.cards.len(), 2);
    assert_ne!(panel.cards[0].key, panel.cards[1].key);
}

#[test]
fn later_fetches_keep_feed_mode_with_inline_busy_trigger() {
    let mut controller = loaded(2);
    controller.load_more().expect("request");

    let panel = feed_panel(&controller);
    assert_eq!(panel.cards.len(), 2);
    assert_eq!(panel.load_more.label, LOAD_MORE_BUSY_LABEL);
    assert!(panel.load_more.busy);
    assert!(!panel.load_more.enabled);
    assert!(!panel.reset.enabled);
}

#[test]
fn error_banner_reflects_last_error() {
    let mut controller = loaded(2);
    controller.load_more().expect("request");
    controller.complete_fetch(Err(FetchError::Transport("dns failure".to_string())));

    let panel = feed_panel(&controller);
    assert_eq!(
        panel.error_banner.as_deref(),
        Some("network error: dns failure")
    );
    assert!(panel.load_more.enabled);
    assert!(panel.validation_message.is_none());
}

#[test]
fn out_of_range_input_disables_triggers_with_message() {
    let mut controller = loaded(2);
    controller.set_requested_batch_size(0);

    let panel = feed_panel(&controller);
    assert_eq!(panel.batch_size_input, 0);
    assert_eq!(
        panel.validation_message.as_deref(),
        Some("batch size must be between 1 and 100 (got 0)")
    );
    assert!(!panel.load_more.enabled);
    assert!(!panel.load_more.busy);
    assert!(!panel.reset.enabled);
    assert!(panel.error_banner.is_none());
}
