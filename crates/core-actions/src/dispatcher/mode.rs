//! Mode transition handling.
//!
//! Insert entry points position the cursor (and for `o`/`O` open a line)
//! before switching. Leaving Insert retreats the cursor one grapheme, Vim
//! style, unless already at column 0.

use super::DispatchResult;
use crate::{InsertEntry, ModeChange};
use core_state::{EditorState, Mode};
use core_text::{Position, motion};

pub(crate) fn handle_mode_change(mc: ModeChange, state: &mut EditorState) -> DispatchResult {
    match mc {
        ModeChange::EnterInsert(entry) => {
            enter_insert(entry, state);
            DispatchResult::dirty()
        }
        ModeChange::LeaveInsert => {
            state.set_mode(Mode::Normal);
            motion::left(&state.buffer, &mut state.cursor);
            DispatchResult::dirty()
        }
        ModeChange::EnterVisual => {
            state.enter_visual();
            DispatchResult::dirty()
        }
        ModeChange::LeaveVisual => {
            state.set_mode(Mode::Normal);
            DispatchResult::dirty()
        }
        ModeChange::EnterCommand => {
            state.set_mode(Mode::Command);
            DispatchResult::dirty()
        }
    }
}

fn enter_insert(entry: InsertEntry, state: &mut EditorState) {
    match entry {
        InsertEntry::AtCursor => {}
        InsertEntry::LineStart => motion::line_start(&state.buffer, &mut state.cursor),
        InsertEntry::AfterCursor => motion::right(&state.buffer, &mut state.cursor),
        InsertEntry::LineEnd => motion::line_end(&state.buffer, &mut state.cursor),
        InsertEntry::OpenBelow => {
            // the opened line belongs to the insert run that follows
            state.begin_insert_edit();
            let at = state.cursor.line + 1;
            state.buffer.insert_empty_line(at);
            state.cursor = Position::new(at, 0);
        }
        InsertEntry::OpenAbove => {
            state.begin_insert_edit();
            let at = state.cursor.line;
            state.buffer.insert_empty_line(at);
            state.cursor = Position::new(at, 0);
        }
    }
    state.set_mode(Mode::Insert);
}
