mod common;
use common::*;

use pretty_assertions::assert_eq;

#[test]
fn undo_reverts_an_insert_run_as_one_unit() {
    let st = run_keys("", &["i", "a", "b", "c", ESC, "u"]);
    assert_eq!(lines(&st), vec![""]);
    assert!(!st.is_saved());
}

#[test]
fn open_line_and_typing_undo_together() {
    let st = run_keys("top", &["o", "new", ESC, "u"]);
    assert_eq!(lines(&st), vec!["top"]);
}

#[test]
fn redo_reapplies_undone_change() {
    let st = run_keys("1\n2", &["d", "u", CTRL_R]);
    assert_eq!(lines(&st), vec!["2"]);
}

#[test]
fn discrete_edits_undo_individually() {
    let st = run_keys("abc", &["x", "x", "u"]);
    assert_eq!(lines(&st), vec!["bc"]);
}

#[test]
fn undo_at_oldest_change_sets_message() {
    let st = run_keys("abc", &["u"]);
    assert_eq!(st.message.as_deref(), Some("Already at oldest change"));
    assert_eq!(lines(&st), vec!["abc"]);
}
