//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion`  - cursor movement semantics
//! * `mode`    - mode transitions and Insert entry points
//! * `edit`    - Insert-mode text mutation and `x`
//! * `lines`   - whole-line register operations (d/y/p/P, Visual y/d)
//! * `command` - command line editing & execution
//! * `undo`    - undo / redo dispatch
//!
//! Every handler leaves the buffer/cursor invariants of `core_state` intact.

use crate::Action;
use core_state::EditorState;

mod command;
mod command_parser;
mod edit;
mod lines;
mod mode;
mod motion;
mod undo;

pub use command_parser::{CommandParser, ParsedCommand};

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A redraw is needed.
    pub dirty: bool,
    /// The session should end.
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }

    /// Merge the result of a follow-up dispatch into this one.
    pub fn absorb(&mut self, other: DispatchResult) {
        self.dirty |= other.dirty;
        self.quit |= other.quit;
    }
}

/// Apply an action to editor state.
pub fn dispatch(action: Action, state: &mut EditorState) -> DispatchResult {
    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, state),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state),
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Line(op) => lines::handle_line_op(op, state),
        Action::CommandInput(_)
        | Action::CommandBackspace
        | Action::CommandCancel
        | Action::CommandExecute => command::handle_command_action(action, state),
        Action::Undo => undo::handle_undo(state),
        Action::Redo => undo::handle_redo(state),
        Action::SaveAndQuit => {
            state.mark_saved();
            state.request_stop();
            DispatchResult::quit()
        }
        Action::ForceQuit => {
            state.force_quit();
            DispatchResult::quit()
        }
    };
    debug_assert!(state.invariants_hold(), "editor invariants violated");
    result
}
