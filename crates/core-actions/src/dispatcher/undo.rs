//! Undo / Redo dispatch over the linear snapshot history in `EditorState`.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState) -> DispatchResult {
    if state.undo() {
        tracing::trace!(target: "actions.dispatch", op = "undo", lines = state.buffer.line_count(), "undo");
    } else {
        state.set_message("Already at oldest change");
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_redo(state: &mut EditorState) -> DispatchResult {
    if state.redo() {
        tracing::trace!(target: "actions.dispatch", op = "redo", lines = state.buffer.line_count(), "redo");
    } else {
        state.set_message("Already at newest change");
    }
    DispatchResult::dirty()
}
