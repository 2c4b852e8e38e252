use crate::common::harness::ViewerTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use cursexml::app::scroll::Outcome;
use cursexml::config::{Config, Keybinding};
use ratatui::style::Color;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_indent_width_from_config() {
    let mut config = Config::default();
    config.viewer.indent_width = 2;
    let harness = ViewerTestHarness::with_config("<r><a><b/></a></r>", &config, 20, 6).unwrap();
    assert_eq!(
        harness.screen_rows()[..5],
        ["<r>", "  <a>", "    <b/>", "  </a>", "</r>"]
    );
}

#[test]
fn test_guides_enabled_at_startup() {
    let mut config = Config::default();
    config.viewer.show_indent_guides = true;
    config.viewer.guide_glyph = "¦".to_string();
    let harness = ViewerTestHarness::with_config("<r><a/></r>", &config, 20, 4).unwrap();
    assert_eq!(harness.screen_rows()[1], "¦   <a/>");
}

#[test]
fn test_custom_keybindings() {
    let mut config = Config::default();
    config.keybindings.push(Keybinding {
        key: "n".to_string(),
        modifiers: vec![],
        action: "move_down".to_string(),
    });
    config.keybindings.push(Keybinding {
        key: "q".to_string(),
        modifiers: vec![],
        action: "none".to_string(),
    });
    let xml = "<r><a/><b/><c/><d/></r>";
    let mut harness = ViewerTestHarness::with_config(xml, &config, 20, 2).unwrap();

    harness.send_key(KeyCode::Char('n'), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.origin(), (1, 0));

    let outcome = harness.send_key(KeyCode::Char('q'), KeyModifiers::NONE).unwrap();
    assert_eq!(outcome, Outcome::Ignore);
}

#[test]
fn test_palette_from_config() {
    let mut config = Config::default();
    config.palette.text = "green".to_string();
    config.palette.tag_markup = "#ff8000".to_string();
    let harness = ViewerTestHarness::with_config("<r>hi</r>", &config, 20, 2).unwrap();
    assert_eq!(harness.get_cell(0, 0).fg, Color::Rgb(0xff, 0x80, 0x00));
    assert_eq!(harness.get_cell(3, 0).fg, Color::Green);
}

#[test]
fn test_config_file_round_trip_drives_viewer() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "viewer": { "indent_width": 3 },
            "keybindings": [ { "key": "x", "action": "quit" } ]
        }"#,
    )
    .unwrap();

    let config = Config::resolve(Some(&path)).unwrap();
    let mut harness = ViewerTestHarness::with_config("<r><a/></r>", &config, 20, 4).unwrap();
    assert_eq!(harness.screen_rows()[1], "   <a/>");
    let outcome = harness.send_key(KeyCode::Char('x'), KeyModifiers::NONE).unwrap();
    assert_eq!(outcome, Outcome::Quit);
}

#[test]
fn test_open_document_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.xml");
    fs::write(
        &path,
        "<?xml version=\"1.0\"?>\n<!-- note -->\n<catalog>\n  <book id=\"b1\">Dune</book>\n</catalog>\n",
    )
    .unwrap();

    let harness = ViewerTestHarness::open_file(&path, 40, 5).unwrap();
    assert_eq!(
        harness.screen_rows()[..3],
        ["<catalog>", "    <book id=\"b1\">Dune</book>", "</catalog>"]
    );
}

#[test]
fn test_missing_and_malformed_documents_fail() {
    let temp_dir = TempDir::new().unwrap();
    assert!(ViewerTestHarness::open_file(&temp_dir.path().join("nope.xml"), 20, 5).is_err());

    let bad = temp_dir.path().join("bad.xml");
    fs::write(&bad, "<a><b></a>").unwrap();
    assert!(ViewerTestHarness::open_file(&bad, 20, 5).is_err());
}
