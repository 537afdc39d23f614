mod common;
use common::*;

use core_state::Mode;
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn quit_is_gated_by_unsaved_changes() {
    let mut st = core_state::EditorState::new("abc", None);
    feed(&mut st, &["i", "X", ESC, ":q", ENTER]);
    assert!(!st.is_stopped());
    assert_eq!(st.mode, Mode::Normal);
    assert_eq!(lines(&st), vec!["Xabc"]);
    assert!(st.message.is_some());

    feed(&mut st, &[":q!", ENTER]);
    assert!(st.is_stopped());
    assert_eq!(st.outcome(), None);
}

#[test]
fn write_quit_returns_text() {
    let st = run_keys("", &["i", "hi", ENTER, "there", ESC, ":wq", ENTER]);
    assert_eq!(st.outcome(), Some("hi\nthere".into()));
}

#[test]
fn x_command_is_write_quit() {
    let st = run_keys("a", &["x", ":x", ENTER]);
    assert_eq!(st.outcome(), Some(String::new()));
}

#[test]
fn write_then_quit_succeeds() {
    let st = run_keys("a", &["x", ":w", ENTER]);
    assert!(!st.is_stopped());
    assert!(st.is_saved());
    let mut st = st;
    feed(&mut st, &[":q", ENTER]);
    assert_eq!(st.outcome(), Some(String::new()));
}

#[test]
fn line_jump_is_one_indexed() {
    let text = (1..=10).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
    let st = run_keys(&text, &["$", ":5", ENTER]);
    assert_eq!(st.cursor, Position::new(4, 0));
    assert_eq!(st.mode, Mode::Normal);
}

#[test]
fn backspace_that_empties_command_returns_to_normal() {
    let st = run_keys("a", &[":", "wq", BACKSPACE]);
    assert_eq!(st.mode, Mode::Command);
    assert_eq!(st.command_line.buffer(), "w");
    let mut st = st;
    feed(&mut st, &[BACKSPACE]);
    assert_eq!(st.mode, Mode::Normal);
    assert!(st.command_line.is_empty());
}

#[test]
fn escape_cancels_without_executing() {
    let st = run_keys("a", &[":wq", ESC]);
    assert!(!st.is_stopped());
    assert_eq!(st.mode, Mode::Normal);
    assert!(st.command_line.is_empty());
}

#[test]
fn unknown_command_silently_returns_to_normal() {
    let st = run_keys("a", &[":frobnicate", ENTER]);
    assert_eq!(st.mode, Mode::Normal);
    assert!(!st.is_stopped());
    assert!(st.message.is_none());
}
