//! Title, status and hint line composition.
//!
//! The status line is built in two stages: `compose_status` produces ordered
//! `StatusSegment`s and `format_status` renders them. Formats:
//! * Command mode: `:<command>`
//! * otherwise: `[MODE] <line>:<col>  <n> lines` (1-based line, 1-based grapheme column)

use core_state::Mode;
use std::fmt::Write as _;

pub const NO_NAME: &str = "[No Name]";
pub const MODIFIED_MARKER: &str = " [+]";

pub struct StatusContext<'a> {
    pub mode: Mode,
    pub line: usize, // 0-based cursor line
    pub col: usize,  // 0-based grapheme index
    pub total_lines: usize,
    pub command_buffer: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    Position { line_1: usize, col_1: usize },
    TotalLines(usize),
    Command(&'a str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    if ctx.mode == Mode::Command {
        return vec![StatusSegment::Command(ctx.command_buffer)];
    }
    vec![
        StatusSegment::Mode(ctx.mode.label()),
        StatusSegment::Position {
            line_1: ctx.line + 1,
            col_1: ctx.col + 1,
        },
        StatusSegment::TotalLines(ctx.total_lines),
    ]
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(32);
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => {
                let _ = write!(s, "[{m}]");
            }
            StatusSegment::Position { line_1, col_1 } => {
                let _ = write!(s, " {line_1}:{col_1}");
            }
            StatusSegment::TotalLines(n) => {
                let unit = if *n == 1 { "line" } else { "lines" };
                let _ = write!(s, "  {n} {unit}");
            }
            StatusSegment::Command(cmd) => {
                s.push(':');
                s.push_str(cmd);
            }
        }
    }
    s
}

pub fn build_status(ctx: &StatusContext) -> String {
    format_status(&compose_status(ctx))
}

/// Title row: display name plus a marker while changes are unsaved.
pub fn format_title(file_name: Option<&str>, saved: bool) -> String {
    let mut title = file_name.unwrap_or(NO_NAME).to_string();
    if !saved {
        title.push_str(MODIFIED_MARKER);
    }
    title
}

/// Contextual key hint for the bottom row.
pub fn hint_for(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => {
            "i/a/o insert  v visual  : command  d delete  y yank  p/P paste  u undo  Z save+quit  ^C discard"
        }
        Mode::Insert => "ESC normal  Enter new line  Backspace delete  arrows move  ^C discard",
        Mode::Visual => "hjkl/wb move  y yank  d delete  ESC cancel",
        Mode::Command => ":w save  :q quit  :q! discard  :wq save+quit  :<n> go to line  ESC cancel",
    }
}
