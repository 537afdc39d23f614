//! Editor state: buffer, cursor, mode, register, command line and session flags.
//!
//! Invariants (checked by `EditorState::invariants_hold`):
//! - the buffer holds at least one line;
//! - `cursor.line < line_count` and `cursor.byte <= line_len(cursor.line)`;
//! - `selection` is `Some` only while `mode == Mode::Visual`;
//! - the command line is non-empty only while `mode == Mode::Command`.
//!
//! Dirty tracking follows the save/quit contract of the session: `saved` starts
//! true, any mutation clears it, `:w`/`:wq`/`ZZ` set it, and the session
//! returns the buffer text only when it stops with `saved == true`.

use core_text::{Buffer, Position};
use std::ops::RangeInclusive;

pub mod undo;
use undo::UndoEngine;
pub use undo::{InsertRun, UNDO_HISTORY_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
    Command,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual => "VISUAL",
            Mode::Command => "COMMAND",
        }
    }
}

/// Anchor captured when Visual mode is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualSelection {
    pub anchor: Position,
}

impl VisualSelection {
    pub fn new(anchor: Position) -> Self {
        Self { anchor }
    }

    /// Normalized inclusive line range between the anchor and the live cursor.
    pub fn line_range(&self, cursor: Position) -> RangeInclusive<usize> {
        let a = self.anchor.line;
        let b = cursor.line;
        a.min(b)..=a.max(b)
    }
}

/// Single-slot register holding the most recent yank/delete as whole lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    lines: Vec<String>,
}

impl Register {
    pub fn store(&mut self, lines: Vec<String>) {
        tracing::trace!(target: "state.register", lines = lines.len(), "register_write");
        self.lines = lines;
    }
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Accumulated `:` command text (without the leading colon).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    buf: String,
}

impl CommandLine {
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    pub fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }
    /// Remove the last character. Returns true when the line is now empty.
    pub fn backspace(&mut self) -> bool {
        self.buf.pop();
        self.buf.is_empty()
    }
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[derive(Debug)]
pub struct EditorState {
    pub buffer: Buffer,
    pub cursor: Position,
    pub mode: Mode,
    pub selection: Option<VisualSelection>,
    pub register: Register,
    pub command_line: CommandLine,
    /// Display-only identity of the text being edited.
    pub file_name: Option<String>,
    /// One-line transient message shown in the hint row until the next key.
    pub message: Option<String>,
    saved: bool,
    stopped: bool,
    undo: UndoEngine,
}

impl EditorState {
    pub fn new(initial: &str, file_name: Option<String>) -> Self {
        Self::with_undo_limit(initial, file_name, UNDO_HISTORY_MAX)
    }

    pub fn with_undo_limit(initial: &str, file_name: Option<String>, undo_limit: usize) -> Self {
        Self {
            buffer: Buffer::from_text(initial),
            cursor: Position::origin(),
            mode: Mode::Normal,
            selection: None,
            register: Register::default(),
            command_line: CommandLine::default(),
            file_name: file_name.filter(|n| !n.is_empty()),
            message: None,
            saved: true,
            stopped: false,
            undo: UndoEngine::new(undo_limit),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }
    pub fn mark_saved(&mut self) {
        self.saved = true;
    }
    pub fn mark_unsaved(&mut self) {
        self.saved = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
    pub fn request_stop(&mut self) {
        tracing::debug!(target: "state", saved = self.saved, "stop_requested");
        self.stopped = true;
    }

    /// Stop immediately and discard, regardless of the dirty flag.
    pub fn force_quit(&mut self) {
        self.saved = false;
        self.request_stop();
    }

    /// Final session result: the joined text after a save-style exit, `None` otherwise.
    pub fn outcome(&self) -> Option<String> {
        if self.stopped && self.saved {
            Some(self.buffer.text())
        } else {
            None
        }
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
    }

    /// Switch mode, dropping state scoped to the mode being left.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == Mode::Insert && mode != Mode::Insert {
            self.undo.end_insert_coalescing();
        }
        if mode != Mode::Visual {
            self.selection = None;
        }
        if mode != Mode::Command {
            self.command_line.clear();
        }
        tracing::trace!(target: "state", from = self.mode.label(), to = mode.label(), "mode_change");
        self.mode = mode;
    }

    pub fn enter_visual(&mut self) {
        self.set_mode(Mode::Visual);
        self.selection = Some(VisualSelection::new(self.cursor));
    }

    /// Line range covered by the active visual selection.
    pub fn selection_range(&self) -> Option<RangeInclusive<usize>> {
        self.selection.map(|s| s.line_range(self.cursor))
    }

    /// Snapshot before a discrete Normal/Visual mutation and mark the buffer unsaved.
    pub fn begin_edit(&mut self) {
        self.undo.push_snapshot(self.cursor, &self.buffer);
        self.saved = false;
    }

    /// Snapshot (once per run) before an Insert-mode mutation and mark the buffer unsaved.
    pub fn begin_insert_edit(&mut self) {
        self.undo.begin_insert_coalescing(self.cursor, &self.buffer);
        self.undo.note_insert_edit();
        self.saved = false;
    }

    pub fn insert_run(&self) -> InsertRun {
        self.undo.insert_run()
    }

    /// Restore the previous snapshot. Returns false at the oldest change.
    pub fn undo(&mut self) -> bool {
        let restored = self.undo.undo(&mut self.cursor, &mut self.buffer);
        if restored {
            self.saved = false;
            self.buffer.clamp(&mut self.cursor);
        }
        restored
    }

    /// Re-apply the most recently undone snapshot. Returns false at the newest change.
    pub fn redo(&mut self) -> bool {
        let restored = self.undo.redo(&mut self.cursor, &mut self.buffer);
        if restored {
            self.saved = false;
            self.buffer.clamp(&mut self.cursor);
        }
        restored
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }

    /// Check the buffer/cursor/mode invariants listed in the module docs.
    pub fn invariants_hold(&self) -> bool {
        let lines = self.buffer.line_count();
        lines >= 1
            && self.cursor.line < lines
            && self.cursor.byte <= self.buffer.line_byte_len(self.cursor.line)
            && self
                .buffer
                .line(self.cursor.line)
                .is_some_and(|l| l.is_char_boundary(self.cursor.byte))
            && (self.selection.is_some() == (self.mode == Mode::Visual))
            && (self.command_line.is_empty() || self.mode == Mode::Command)
    }
}
