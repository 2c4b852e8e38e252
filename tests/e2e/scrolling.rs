use crate::common::harness::ViewerTestHarness;
use cursexml::app::scroll::Outcome;
use crossterm::event::{KeyCode, KeyModifiers};

/// `<root>` with `count` one-line `<item>` children
fn items(count: usize) -> String {
    let body: String = (0..count).map(|i| format!("<item>{i}</item>")).collect();
    format!("<root>{body}</root>")
}

#[test]
fn test_line_scrolling() {
    let mut harness = ViewerTestHarness::new(&items(50), 40, 10).unwrap();
    assert!(!harness.reached_document_end());

    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (1, 0));
    assert_eq!(harness.screen_rows()[0], "    <item>0</item>");

    harness.send_key(KeyCode::Char('j'), KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (1, 0));
}

#[test]
fn test_move_up_at_top_is_noop() {
    let mut harness = ViewerTestHarness::new(&items(50), 40, 10).unwrap();
    let before = harness.screen_to_string();
    harness.send_key_repeat(KeyCode::Up, KeyModifiers::NONE, 3).unwrap();
    assert_eq!(harness.origin(), (0, 0));
    assert_eq!(harness.screen_to_string(), before);
}

#[test]
fn test_page_down_to_document_end() {
    // 52 rows: <root>, 50 items, </root>
    let mut harness = ViewerTestHarness::new(&items(50), 40, 10).unwrap();

    harness.send_key(KeyCode::PageDown, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (10, 0));
    assert_eq!(harness.screen_rows()[0], "    <item>9</item>");

    harness
        .send_key_repeat(KeyCode::PageDown, KeyModifiers::NONE, 10)
        .unwrap();
    assert_eq!(harness.origin(), (50, 0));
    assert!(harness.reached_document_end());
    assert_eq!(harness.screen_rows()[..3], ["    <item>49</item>", "</root>", ""]);

    // Nothing more to show
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Char(' '), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (50, 0));

    harness.send_key(KeyCode::PageUp, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (40, 0));
    assert!(!harness.reached_document_end());
}

#[test]
fn test_move_down_stops_when_end_visible() {
    let mut harness = ViewerTestHarness::new(&items(3), 40, 10).unwrap();
    assert!(harness.reached_document_end());
    harness
        .send_key_repeat(KeyCode::Down, KeyModifiers::NONE, 5)
        .unwrap();
    assert_eq!(harness.origin(), (0, 0));
    harness.assert_screen_contains("<root>");
}

#[test]
fn test_horizontal_scrolling_bounded_by_longest_row() {
    let xml = format!("<r><a long=\"{}\"/></r>", "x".repeat(30));
    let mut harness = ViewerTestHarness::new(&xml, 20, 5).unwrap();

    // Row 1 is 46 columns wide; scrolling stops once its end is on screen
    harness
        .send_key_repeat(KeyCode::Right, KeyModifiers::NONE, 50)
        .unwrap();
    assert_eq!(harness.origin(), (0, 27));
    assert_eq!(
        harness.screen_rows()[..3],
        [String::new(), format!("{}\"/>", "x".repeat(16)), String::new()]
    );

    harness.send_key(KeyCode::Char('h'), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (0, 26));
}

#[test]
fn test_move_left_at_zero_is_noop() {
    let mut harness = ViewerTestHarness::new(&items(5), 40, 10).unwrap();
    harness.send_key(KeyCode::Left, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (0, 0));
}

#[test]
fn test_move_right_noop_when_everything_fits() {
    let mut harness = ViewerTestHarness::new(&items(5), 40, 10).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (0, 0));
}

#[test]
fn test_horizontal_bound_uses_visible_rows_only() {
    let xml = format!(
        "<r><wide v=\"{}\"/><n/><n/><n/><n/></r>",
        "y".repeat(60)
    );
    let mut harness = ViewerTestHarness::new(&xml, 10, 3).unwrap();
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    // Only "    <n/>" rows are visible now, and they fit
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (2, 0));
}

#[test]
fn test_go_to_top() {
    let mut harness = ViewerTestHarness::new(&items(50), 10, 10).unwrap();
    harness.send_key(KeyCode::PageDown, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (10, 1));

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (0, 0));
    assert_eq!(harness.screen_rows()[0], "<root>");
}

#[test]
fn test_unbound_key_does_not_redraw() {
    let mut harness = ViewerTestHarness::new(&items(5), 40, 10).unwrap();
    let outcome = harness.send_key(KeyCode::F(2), KeyModifiers::NONE).unwrap();
    assert_eq!(outcome, Outcome::Ignore);
    assert_eq!(harness.origin(), (0, 0));
}

#[test]
fn test_quit_keys() {
    let mut harness = ViewerTestHarness::new(&items(5), 40, 10).unwrap();
    for (code, modifiers) in [
        (KeyCode::Char('q'), KeyModifiers::NONE),
        (KeyCode::Esc, KeyModifiers::NONE),
        (KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        assert_eq!(harness.send_key(code, modifiers).unwrap(), Outcome::Quit);
    }
}
