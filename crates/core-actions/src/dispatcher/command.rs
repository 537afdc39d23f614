//! Command line editing & execution (`:q`, `:q!`, `:w`, `:wq`, `:x`, `:e!`, `:<line>`).
//!
//! "Write" never touches the file system: it marks the buffer saved so the
//! session hands the text back to its caller. Unrecognized or out-of-range
//! commands silently return to Normal mode.

use super::DispatchResult;
use super::command_parser::{CommandParser, ParsedCommand};
use crate::Action;
use core_state::{EditorState, Mode};
use core_text::Position;

pub(crate) const NO_WRITE_SINCE_CHANGE: &str = "No write since last change (add ! to override)";

pub(crate) fn handle_command_action(action: Action, state: &mut EditorState) -> DispatchResult {
    match action {
        Action::CommandInput(text) => {
            // pasted line breaks never reach the command line
            state.command_line.push_str(&text.replace(char::is_control, ""));
            DispatchResult::dirty()
        }
        Action::CommandBackspace => {
            if state.command_line.backspace() {
                state.set_mode(Mode::Normal);
            }
            DispatchResult::dirty()
        }
        Action::CommandCancel => {
            state.set_mode(Mode::Normal);
            DispatchResult::dirty()
        }
        Action::CommandExecute => {
            let raw = state.command_line.take();
            execute_command(&raw, state)
        }
        _ => DispatchResult::clean(),
    }
}

fn execute_command(raw: &str, state: &mut EditorState) -> DispatchResult {
    let parsed = CommandParser::parse(raw);
    tracing::debug!(target: "actions.command", command = parsed.label(), saved = state.is_saved(), "execute");
    state.set_mode(Mode::Normal);
    match parsed {
        ParsedCommand::Quit => {
            if !state.is_saved() {
                state.set_message(NO_WRITE_SINCE_CHANGE);
                return DispatchResult::dirty();
            }
            state.mark_saved();
            state.request_stop();
            DispatchResult::quit()
        }
        ParsedCommand::ForceQuit => {
            state.mark_unsaved();
            state.request_stop();
            DispatchResult::quit()
        }
        ParsedCommand::Write => {
            state.mark_saved();
            state.set_message(format!("{} lines written", state.buffer.line_count()));
            DispatchResult::dirty()
        }
        ParsedCommand::WriteQuit => {
            state.mark_saved();
            state.request_stop();
            DispatchResult::quit()
        }
        // reload is not implemented; behaves like an accepted no-op
        ParsedCommand::Reload => DispatchResult::dirty(),
        ParsedCommand::GoToLine(n) => {
            if n <= state.buffer.line_count() {
                state.cursor = Position::new(n - 1, 0);
            }
            DispatchResult::dirty()
        }
        ParsedCommand::Unknown(_) => DispatchResult::dirty(),
    }
}
