#![allow(dead_code)] // Shared across several integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, handle_key};
use core_events::KeyDecoder;
use core_state::EditorState;

pub const ESC: &str = "\x1b";
pub const ENTER: &str = "\r";
pub const BACKSPACE: &str = "\x7f";
pub const CTRL_C: &str = "\x03";
pub const CTRL_R: &str = "\x12";
pub const UP: &str = "\x1b[A";
pub const DOWN: &str = "\x1b[B";
pub const RIGHT: &str = "\x1b[C";
pub const LEFT: &str = "\x1b[D";

/// Feed raw chunks (as a terminal would deliver them) into the state machine.
pub fn feed(state: &mut EditorState, chunks: &[&str]) -> DispatchResult {
    let mut decoder = KeyDecoder::new();
    let mut result = DispatchResult::clean();
    for chunk in chunks {
        for key in decoder.decode(chunk) {
            result.absorb(handle_key(state, &key));
            assert!(state.invariants_hold(), "invariants broken after {chunk:?}");
            if state.is_stopped() {
                return result;
            }
        }
    }
    result
}

pub fn run_keys(initial: &str, chunks: &[&str]) -> EditorState {
    let mut state = EditorState::new(initial, None);
    feed(&mut state, chunks);
    state
}

pub fn lines(state: &EditorState) -> Vec<&str> {
    state.buffer.lines().iter().map(String::as_str).collect()
}
