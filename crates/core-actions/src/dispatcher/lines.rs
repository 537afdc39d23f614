//! Whole-line register operations.
//!
//! Every yank/delete overwrites the single register with the affected lines.
//! Deletions never leave the buffer empty: removing every line collapses it to
//! one empty line and resets the cursor to the origin.

use super::DispatchResult;
use crate::LineOp;
use core_state::{EditorState, Mode};
use core_text::Position;
use std::ops::RangeInclusive;

pub(crate) fn handle_line_op(op: LineOp, state: &mut EditorState) -> DispatchResult {
    match op {
        LineOp::YankLine => {
            let line = state.cursor.line;
            let lines = state.buffer.copy_lines(line..=line);
            state.register.store(lines);
            DispatchResult::clean()
        }
        LineOp::DeleteLine => {
            let line = state.cursor.line;
            delete_range(state, line..=line);
            DispatchResult::dirty()
        }
        LineOp::PasteAfter => {
            let at = state.cursor.line + 1;
            paste(state, at)
        }
        LineOp::PasteBefore => {
            let at = state.cursor.line;
            paste(state, at)
        }
        LineOp::YankSelection => {
            if let Some(range) = state.selection_range() {
                let lines = state.buffer.copy_lines(range);
                state.register.store(lines);
            }
            state.set_mode(Mode::Normal);
            DispatchResult::dirty()
        }
        LineOp::DeleteSelection => {
            if let Some(range) = state.selection_range() {
                delete_range(state, range);
            }
            state.set_mode(Mode::Normal);
            DispatchResult::dirty()
        }
    }
}

fn delete_range(state: &mut EditorState, range: RangeInclusive<usize>) {
    state.begin_edit();
    let start = *range.start();
    let whole_buffer = range.clone().count() >= state.buffer.line_count();
    let removed = state.buffer.remove_lines(range);
    tracing::trace!(target: "actions.dispatch", op = "delete_lines", count = removed.len(), whole_buffer, "edit");
    state.register.store(removed);
    state.cursor = if whole_buffer {
        Position::origin()
    } else {
        Position::new(start.min(state.buffer.line_count() - 1), 0)
    };
}

/// Insert the register so its first line lands at index `at`; the cursor moves there.
fn paste(state: &mut EditorState, at: usize) -> DispatchResult {
    if state.register.is_empty() {
        return DispatchResult::clean();
    }
    state.begin_edit();
    let lines = state.register.lines().to_vec();
    state.buffer.insert_lines(at, &lines);
    state.cursor = Position::new(at, 0);
    tracing::trace!(target: "actions.dispatch", op = "paste", count = lines.len(), at, "edit");
    DispatchResult::dirty()
}
