//! Mode state machine: key translation and action dispatch.
//!
//! Each decoded `Key` is translated against the current `Mode` into at most
//! one `Action`, which the dispatcher applies to `EditorState`. `handle_key`
//! is the single entry point used by the session; it also owns the two
//! mode-independent rules:
//! * `Ctrl+C` force-quits from every mode, bypassing the dirty flag.
//! * A printable run received outside Insert/Command mode is interpreted one
//!   grapheme at a time, re-reading the mode after each, so a chunk such as
//!   `ihello` enters Insert mode and inserts the remainder as one unit.

use core_events::Key;
use core_state::{EditorState, Mode};
use unicode_segmentation::UnicodeSegmentation;

pub mod dispatcher;
pub mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    WordForward,
    WordBackward,
    LineStart,
    LineEnd,
    BufferStart,
    LastLine,
}

/// Where the cursor lands when entering Insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEntry {
    /// `i`
    AtCursor,
    /// `I`
    LineStart,
    /// `a`
    AfterCursor,
    /// `A`
    LineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    EnterInsert(InsertEntry),
    LeaveInsert,
    EnterVisual,
    LeaveVisual,
    EnterCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Splice printable text at the cursor (line breaks inside split the line).
    InsertText(String),
    InsertNewline,
    Backspace,
    /// Normal-mode `x`.
    DeleteUnder,
}

/// Whole-line register operations (`d`, `y`, `p`, `P` and their Visual forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOp {
    DeleteLine,
    YankLine,
    PasteAfter,
    PasteBefore,
    YankSelection,
    DeleteSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    ModeChange(ModeChange),
    Edit(EditKind),
    Line(LineOp),
    CommandInput(String),
    CommandBackspace,
    CommandCancel,
    CommandExecute,
    Undo,
    Redo,
    /// `ZZ`
    SaveAndQuit,
    /// `Ctrl+C`
    ForceQuit,
}

/// Feed one decoded key through translation and dispatch.
pub fn handle_key(state: &mut EditorState, key: &Key) -> DispatchResult {
    state.message = None;
    if key.is_interrupt() {
        tracing::info!(target: "actions", mode = state.mode.label(), "interrupt_force_quit");
        return dispatch(Action::ForceQuit, state);
    }
    match key {
        Key::Printable(text) if !matches!(state.mode, Mode::Insert | Mode::Command) => {
            handle_printable_run(state, text)
        }
        _ => match translate_key(state.mode, key) {
            Some(action) => dispatch(action, state),
            None => DispatchResult::clean(),
        },
    }
}

fn handle_printable_run(state: &mut EditorState, text: &str) -> DispatchResult {
    let mut result = DispatchResult::clean();
    for (idx, g) in text.grapheme_indices(true) {
        if state.is_stopped() {
            break;
        }
        if matches!(state.mode, Mode::Insert | Mode::Command) {
            let rest = Key::Printable(text[idx..].to_string());
            if let Some(action) = translate_key(state.mode, &rest) {
                result.absorb(dispatch(action, state));
            }
            break;
        }
        if let Some(action) = translate_key(state.mode, &Key::Printable(g.to_string())) {
            result.absorb(dispatch(action, state));
        }
    }
    result
}
