mod common;
use common::*;

use core_state::Mode;
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn visual_delete_removes_selected_lines() {
    let st = run_keys("1\n2\n3\n4", &["j", "v", "j", "d"]);
    assert_eq!(lines(&st), vec!["1", "4"]);
    assert_eq!(st.cursor.line, 1);
    assert_eq!(st.mode, Mode::Normal);
    assert_eq!(st.register.lines(), &["2", "3"]);
    assert!(st.selection.is_none());
}

#[test]
fn visual_range_is_normalized_when_moving_up() {
    let st = run_keys("1\n2\n3\n4", &["G", "v", "k", "k", "y"]);
    assert_eq!(st.register.lines(), &["2", "3", "4"]);
    assert_eq!(lines(&st), vec!["1", "2", "3", "4"]);
    assert_eq!(st.mode, Mode::Normal);
    assert!(st.is_saved());
}

#[test]
fn visual_delete_of_whole_buffer_leaves_empty_line() {
    let st = run_keys("a\nb\nc", &["v", "G", "d"]);
    assert_eq!(lines(&st), vec![""]);
    assert_eq!(st.cursor, Position::origin());
}

#[test]
fn escape_cancels_without_mutation() {
    let st = run_keys("a\nb", &["v", "j", ESC]);
    assert_eq!(st.mode, Mode::Normal);
    assert!(st.selection.is_none());
    assert_eq!(lines(&st), vec!["a", "b"]);
    assert!(st.register.is_empty());
}

#[test]
fn anchor_is_captured_at_entry() {
    let st = run_keys("abc\ndef", &["l", "v", "j"]);
    assert_eq!(st.mode, Mode::Visual);
    let sel = st.selection.expect("selection active");
    assert_eq!(sel.anchor, Position::new(0, 1));
    assert_eq!(st.selection_range(), Some(0..=1));
}

#[test]
fn yank_then_paste_from_visual() {
    let st = run_keys("x\ny", &["v", "j", "y", "G", "p"]);
    assert_eq!(lines(&st), vec!["x", "y", "x", "y"]);
}
