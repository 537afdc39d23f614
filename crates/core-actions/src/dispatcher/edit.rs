//! Text edit action handling (insert/backspace/newline in Insert mode, `x` in Normal).
//!
//! All operations act on grapheme boundaries through `core_text::Buffer`.
//! Insert-mode edits share one undo snapshot per run; `x` takes its own.

use super::DispatchResult;
use crate::EditKind;
use core_state::{EditorState, Mode};
use core_text::normalize_line_breaks;
use core_text::segment::normalize;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    match kind {
        EditKind::InsertText(text) => {
            if state.mode != Mode::Insert || text.is_empty() {
                return DispatchResult::clean();
            }
            insert_text(state, &text);
            DispatchResult::dirty()
        }
        EditKind::InsertNewline => {
            if state.mode != Mode::Insert {
                return DispatchResult::clean();
            }
            state.begin_insert_edit();
            state.buffer.split_line(&mut state.cursor);
            tracing::trace!(target: "actions.dispatch", op = "insert_newline", line = state.cursor.line, "edit");
            DispatchResult::dirty()
        }
        EditKind::Backspace => {
            if state.mode != Mode::Insert || (state.cursor.line == 0 && state.cursor.byte == 0) {
                return DispatchResult::clean();
            }
            state.begin_insert_edit();
            state.buffer.delete_grapheme_before(&mut state.cursor);
            tracing::trace!(target: "actions.dispatch", op = "backspace", line = state.cursor.line, byte = state.cursor.byte, "edit");
            DispatchResult::dirty()
        }
        EditKind::DeleteUnder => {
            if state.cursor.byte >= state.buffer.line_byte_len(state.cursor.line) {
                return DispatchResult::clean();
            }
            state.begin_edit();
            let removed = state.buffer.delete_grapheme_at(&state.cursor);
            tracing::trace!(target: "actions.dispatch", op = "delete_under", removed_len = removed.map(|r| r.len()), "edit");
            DispatchResult::dirty()
        }
    }
}

/// Splice NFC-normalized text at the cursor. Embedded line breaks split the
/// line exactly as Enter would.
fn insert_text(state: &mut EditorState, text: &str) {
    let normalized = normalize(&normalize_line_breaks(text));
    state.begin_insert_edit();
    for (idx, piece) in normalized.split('\n').enumerate() {
        if idx > 0 {
            state.buffer.split_line(&mut state.cursor);
        }
        if !piece.is_empty() {
            state.buffer.insert_str(&mut state.cursor, piece);
        }
    }
    tracing::trace!(target: "actions.dispatch", op = "insert_text", len = normalized.len(), line = state.cursor.line, byte = state.cursor.byte, "edit");
}
