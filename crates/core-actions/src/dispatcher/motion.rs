//! Motion sub-dispatch (cursor movement).
//!
//! Pure cursor movement; never touches buffer text or the dirty flag. Shared
//! by Normal, Visual (selection follows the cursor) and Insert (arrow keys).

use super::DispatchResult;
use crate::MotionKind;
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    let buf = &state.buffer;
    let pos = &mut state.cursor;
    match kind {
        MotionKind::Left => motion::left(buf, pos),
        MotionKind::Right => motion::right(buf, pos),
        MotionKind::Up => motion::up(buf, pos),
        MotionKind::Down => motion::down(buf, pos),
        MotionKind::WordForward => motion::word_forward(buf, pos),
        MotionKind::WordBackward => motion::word_backward(buf, pos),
        MotionKind::LineStart => motion::line_start(buf, pos),
        MotionKind::LineEnd => motion::line_end(buf, pos),
        MotionKind::BufferStart => motion::buffer_start(buf, pos),
        MotionKind::LastLine => motion::last_line(buf, pos),
    }
    if state.cursor == before {
        return DispatchResult::clean();
    }
    tracing::trace!(target: "actions.dispatch", ?kind, from_line = before.line, from_byte = before.byte, to_line = state.cursor.line, to_byte = state.cursor.byte, "motion");
    DispatchResult::dirty()
}
