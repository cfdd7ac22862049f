mod common;
use common::Session;

use core_events::KeyCode;
use core_state::{MessageKind, Mode};
use core_text::Position;
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn save_with_path_then_plain_save_reuses_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut s = Session::new(&["alpha", "beta"]);
    s.command(&format!("save {}", path.display()));
    assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\nbeta");
    assert!(!s.model.state().dirty);
    assert_eq!(s.model.state().file_name.as_deref(), Some(path.as_path()));

    s.command("w");
    s.type_text("!");
    s.press(KeyCode::Esc);
    assert!(s.model.state().dirty);
    s.command("s");
    assert_eq!(fs::read_to_string(&path).unwrap(), "!alpha\nbeta");
    assert!(!s.model.state().dirty);
}

#[test]
fn save_without_name_prompts_for_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompted.txt");
    let mut s = Session::new(&["body"]);
    s.command("save");
    assert_eq!(
        s.model.state().prompt.as_ref().map(|p| p.label()),
        Some("Save as: ")
    );
    s.type_text(&path.display().to_string());
    s.press(KeyCode::Enter);
    assert!(s.model.state().prompt.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "body");
}

#[test]
fn empty_prompt_submit_reports_missing_name() {
    let mut s = Session::new(&["body"]);
    s.command("save");
    s.press(KeyCode::Enter);
    assert!(s.model.state().prompt.is_none());
    let msg = s.model.state().ephemeral_status.as_ref().unwrap();
    assert_eq!(msg.kind, MessageKind::Error);
    assert_eq!(msg.text, "no file name");
}

#[test]
fn prompt_escape_cancels_without_side_effects() {
    let mut s = Session::new(&["body"]);
    s.command("open");
    s.type_text("whatever");
    s.press(KeyCode::Backspace);
    assert_eq!(s.model.state().prompt.as_ref().unwrap().input, "whateve");
    s.press(KeyCode::Esc);
    assert!(s.model.state().prompt.is_none());
    assert_eq!(s.model.state().mode, Mode::Command);
    assert_eq!(s.lines(), vec!["body"]);
}

#[test]
fn open_replaces_document_and_resets_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    fs::write(&path, "first\r\nsecond\r\n").unwrap();
    let mut s = Session::new(&["old", "content", "here"]);
    s.press(KeyCode::Down);
    s.press(KeyCode::Down);
    assert!(s.command(&format!("o {}", path.display())).unwrap().dirty);
    assert_eq!(s.lines(), vec!["first", "second"]);
    assert_eq!(s.model.cursor(), Position::origin());
    assert!(!s.model.state().dirty);

    // Line endings and the trailing newline survive a round trip.
    s.command("s");
    assert_eq!(fs::read_to_string(&path).unwrap(), "first\r\nsecond\r\n");
}

#[test]
fn open_missing_file_keeps_current_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let mut s = Session::new(&["keep"]);
    s.command(&format!("open {}", path.display()));
    assert_eq!(s.lines(), vec!["keep"]);
    let msg = s.model.state().ephemeral_status.as_ref().unwrap();
    assert_eq!(msg.kind, MessageKind::Error);
    assert!(msg.text.contains("absent.txt"), "{}", msg.text);
}
