//! Scoped acquisition of the shared input and terminal.
//!
//! `SessionGuard::acquire` detaches host listeners, remembers the previous raw
//! mode, enables raw mode and enters the editing screen. Dropping the guard
//! undoes exactly the steps that succeeded, in reverse order, on every exit
//! path: normal return, `?` propagation, a cancelled future or a panic.
//! Release failures are logged and swallowed.

use crate::SessionError;
use core_input::InputSource;
use core_terminal::TerminalBackend;
use tracing::{debug, warn};

pub struct SessionGuard<'a, I: InputSource, T: TerminalBackend> {
    input: &'a mut I,
    terminal: &'a mut T,
    previous_raw: bool,
    suspended: bool,
    raw_set: bool,
    screen_entered: bool,
}

impl<'a, I: InputSource, T: TerminalBackend> SessionGuard<'a, I, T> {
    pub fn acquire(input: &'a mut I, terminal: &'a mut T) -> Result<Self, SessionError> {
        let mut guard = Self {
            input,
            terminal,
            previous_raw: false,
            suspended: false,
            raw_set: false,
            screen_entered: false,
        };
        guard.input.suspend().map_err(SessionError::Acquire)?;
        guard.suspended = true;

        guard.previous_raw = guard.terminal.raw_mode_enabled().unwrap_or_else(|e| {
            warn!(target: "session", error = %e, "raw_mode_query_failed_assuming_cooked");
            false
        });
        guard
            .terminal
            .set_raw_mode(true)
            .map_err(SessionError::Acquire)?;
        guard.raw_set = true;

        guard
            .terminal
            .enter_screen()
            .map_err(SessionError::Acquire)?;
        guard.screen_entered = true;

        debug!(target: "session", previous_raw = guard.previous_raw, "terminal_acquired");
        Ok(guard)
    }

    pub fn input(&mut self) -> &mut I {
        &mut *self.input
    }

    pub fn terminal(&mut self) -> &mut T {
        &mut *self.terminal
    }
}

impl<I: InputSource, T: TerminalBackend> Drop for SessionGuard<'_, I, T> {
    fn drop(&mut self) {
        if self.screen_entered
            && let Err(e) = self.terminal.leave_screen()
        {
            warn!(target: "session", error = %e, "leave_screen_failed");
        }
        if self.raw_set
            && let Err(e) = self.terminal.set_raw_mode(self.previous_raw)
        {
            warn!(target: "session", error = %e, "restore_raw_mode_failed");
        }
        if self.suspended
            && let Err(e) = self.input.resume()
        {
            warn!(target: "session", error = %e, "resume_listeners_failed");
        }
        debug!(target: "session", "terminal_released");
    }
}
