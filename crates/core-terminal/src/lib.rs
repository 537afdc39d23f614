//! Terminal backend abstraction and crossterm implementation.
//!
//! The session controller only needs four things from a terminal: query and
//! set raw mode, and enter/leave the editing screen. Keeping them behind
//! `TerminalBackend` lets the session run against an in-memory double in
//! tests.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        is_raw_mode_enabled,
    },
};
use std::io::stdout;
use tracing::debug;

pub trait TerminalBackend {
    fn raw_mode_enabled(&self) -> Result<bool>;
    fn set_raw_mode(&mut self, enabled: bool) -> Result<()>;
    fn enter_screen(&mut self) -> Result<()>;
    fn leave_screen(&mut self) -> Result<()>;
    /// `(columns, rows)`
    fn size(&self) -> Result<(u16, u16)>;
}

pub struct CrosstermBackend {
    alternate_screen: bool,
    entered: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CrosstermBackend {
    pub fn new(alternate_screen: bool) -> Self {
        Self {
            alternate_screen,
            entered: false,
        }
    }
}

impl TerminalBackend for CrosstermBackend {
    fn raw_mode_enabled(&self) -> Result<bool> {
        Ok(is_raw_mode_enabled()?)
    }

    fn set_raw_mode(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            enable_raw_mode()?;
        } else {
            disable_raw_mode()?;
        }
        debug!(target: "terminal", enabled, "raw_mode_set");
        Ok(())
    }

    fn enter_screen(&mut self) -> Result<()> {
        if !self.entered {
            if self.alternate_screen {
                execute!(stdout(), EnterAlternateScreen)?;
            }
            execute!(stdout(), Hide, EnableBracketedPaste)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave_screen(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), DisableBracketedPaste, Show)?;
            if self.alternate_screen {
                execute!(stdout(), LeaveAlternateScreen)?;
            }
            self.entered = false;
        }
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(crossterm::terminal::size()?)
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave_screen();
    }
}
