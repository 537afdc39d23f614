//! Key -> Action translation per mode.
//!
//! Translation is pure: the same `(Mode, Key)` pair always yields the same
//! action. Keys a mode does not bind translate to `None` and are dropped.
//! `Ctrl+C` is intercepted in `handle_key` before translation.

use crate::{Action, EditKind, InsertEntry, LineOp, ModeChange, MotionKind};
use core_events::{Direction, Key, control};
use core_state::Mode;

pub fn translate_key(mode: Mode, key: &Key) -> Option<Action> {
    match mode {
        Mode::Normal => translate_normal(key),
        Mode::Insert => translate_insert(key),
        Mode::Visual => translate_visual(key),
        Mode::Command => translate_command(key),
    }
}

fn arrow_motion(dir: Direction) -> MotionKind {
    match dir {
        Direction::Up => MotionKind::Up,
        Direction::Down => MotionKind::Down,
        Direction::Left => MotionKind::Left,
        Direction::Right => MotionKind::Right,
    }
}

/// Motion bindings shared by Normal and Visual mode.
fn motion_for(s: &str) -> Option<MotionKind> {
    let kind = match s {
        "h" => MotionKind::Left,
        "l" => MotionKind::Right,
        "j" => MotionKind::Down,
        "k" => MotionKind::Up,
        "w" => MotionKind::WordForward,
        "b" => MotionKind::WordBackward,
        "0" => MotionKind::LineStart,
        "$" => MotionKind::LineEnd,
        "g" => MotionKind::BufferStart,
        "G" => MotionKind::LastLine,
        _ => return None,
    };
    Some(kind)
}

fn translate_normal(key: &Key) -> Option<Action> {
    match key {
        Key::Arrow(dir) => Some(Action::Motion(arrow_motion(*dir))),
        Key::Control(control::CTRL_R) => Some(Action::Redo),
        Key::Control(_) | Key::Unsupported(_) => None,
        Key::Printable(s) => {
            if let Some(kind) = motion_for(s) {
                return Some(Action::Motion(kind));
            }
            let action = match s.as_str() {
                "i" => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::AtCursor)),
                "I" => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::LineStart)),
                "a" => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::AfterCursor)),
                "A" => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::LineEnd)),
                "o" => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::OpenBelow)),
                "O" => Action::ModeChange(ModeChange::EnterInsert(InsertEntry::OpenAbove)),
                "v" => Action::ModeChange(ModeChange::EnterVisual),
                ":" => Action::ModeChange(ModeChange::EnterCommand),
                "x" => Action::Edit(EditKind::DeleteUnder),
                "d" => Action::Line(LineOp::DeleteLine),
                "y" => Action::Line(LineOp::YankLine),
                "p" => Action::Line(LineOp::PasteAfter),
                "P" => Action::Line(LineOp::PasteBefore),
                "u" => Action::Undo,
                "Z" => Action::SaveAndQuit,
                _ => return None,
            };
            Some(action)
        }
    }
}

fn translate_insert(key: &Key) -> Option<Action> {
    match key {
        k if k.is_escape() => Some(Action::ModeChange(ModeChange::LeaveInsert)),
        k if k.is_enter() => Some(Action::Edit(EditKind::InsertNewline)),
        k if k.is_backspace() => Some(Action::Edit(EditKind::Backspace)),
        Key::Arrow(dir) => Some(Action::Motion(arrow_motion(*dir))),
        Key::Printable(s) => Some(Action::Edit(EditKind::InsertText(s.clone()))),
        Key::Control(_) | Key::Unsupported(_) => None,
    }
}

fn translate_visual(key: &Key) -> Option<Action> {
    match key {
        k if k.is_escape() => Some(Action::ModeChange(ModeChange::LeaveVisual)),
        Key::Arrow(dir) => Some(Action::Motion(arrow_motion(*dir))),
        Key::Printable(s) => {
            if let Some(kind) = motion_for(s) {
                return Some(Action::Motion(kind));
            }
            match s.as_str() {
                "y" => Some(Action::Line(LineOp::YankSelection)),
                "d" => Some(Action::Line(LineOp::DeleteSelection)),
                "v" => Some(Action::ModeChange(ModeChange::LeaveVisual)),
                _ => None,
            }
        }
        Key::Control(_) | Key::Unsupported(_) => None,
    }
}

fn translate_command(key: &Key) -> Option<Action> {
    match key {
        k if k.is_escape() => Some(Action::CommandCancel),
        k if k.is_enter() => Some(Action::CommandExecute),
        k if k.is_backspace() => Some(Action::CommandBackspace),
        Key::Printable(s) => Some(Action::CommandInput(s.clone())),
        Key::Arrow(_) | Key::Control(_) | Key::Unsupported(_) => None,
    }
}
