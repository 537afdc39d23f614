//! Terminal writer: translates a composed `Frame` into queued crossterm
//! commands and flushes once.
//!
//! * Commands preserve ordering; nothing is flushed mid-frame.
//! * Every frame starts with a full clear, rows are addressed absolutely.
//! * Styling is reset after every styled span.

use crate::Frame;
use crate::style::SpanFlags;
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ClearAll,
    MoveTo(u16, u16),
    Style(SpanFlags),
    Print(String),
    Reset,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn for_frame(frame: &Frame) -> Self {
        let mut w = Self::new();
        w.cmds.push(Command::ClearAll);
        for (y, row) in frame.rows.iter().enumerate() {
            w.move_to(0, y.min(u16::MAX as usize) as u16);
            for span in &row.spans {
                if span.flags.is_empty() {
                    w.print(span.text.as_str());
                } else {
                    w.cmds.push(Command::Style(span.flags));
                    w.print(span.text.as_str());
                    w.cmds.push(Command::Reset);
                }
            }
        }
        w
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::ClearAll => {
                    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
                }
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::Style(flags) => apply_style(out, flags)?,
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
                Command::Reset => {
                    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn apply_style<W: Write>(out: &mut W, flags: SpanFlags) -> Result<()> {
    if flags.contains(SpanFlags::SELECTION) {
        queue!(out, SetBackgroundColor(Color::DarkBlue))?;
    } else if flags.contains(SpanFlags::CURSOR_LINE) {
        queue!(out, SetBackgroundColor(Color::DarkGrey))?;
    }
    if flags.contains(SpanFlags::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    if flags.contains(SpanFlags::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

/// Emit a full frame to `out`.
pub fn emit_frame<W: Write>(frame: &Frame, out: &mut W) -> Result<()> {
    Writer::for_frame(frame).flush(out)
}
