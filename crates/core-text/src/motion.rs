//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor
//! state. Horizontal motions never leave the current line and every result
//! satisfies `byte <= line_len` on a grapheme boundary.

use crate::{Buffer, Position, grapheme};

/// Move left one grapheme boundary (stops at column 0).
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.byte == 0 {
        return;
    }
    if let Some(line) = buf.line(pos.line) {
        pos.byte = grapheme::prev_boundary(line, pos.byte);
    }
}

/// Move right one grapheme boundary, clamped to the end-of-line slot.
pub fn right(buf: &Buffer, pos: &mut Position) {
    if let Some(line) = buf.line(pos.line) {
        pos.byte = grapheme::next_boundary(line, pos.byte);
    }
}

/// Move to start of line.
pub fn line_start(_buf: &Buffer, pos: &mut Position) {
    pos.byte = 0;
}

/// Move to end of line (after last grapheme).
pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.byte = buf.line_byte_len(pos.line);
}

/// Move to line 0, column 0.
pub fn buffer_start(_buf: &Buffer, pos: &mut Position) {
    *pos = Position::origin();
}

/// Move to column 0 of the last line.
pub fn last_line(buf: &Buffer, pos: &mut Position) {
    pos.line = buf.line_count() - 1;
    pos.byte = 0;
}

/// Move up one line keeping the display column, clamped to the target line.
pub fn up(buf: &Buffer, pos: &mut Position) {
    if pos.line == 0 {
        return;
    }
    vertical(buf, pos, pos.line - 1);
}

/// Move down one line keeping the display column, clamped to the target line.
pub fn down(buf: &Buffer, pos: &mut Position) {
    if pos.line + 1 >= buf.line_count() {
        return;
    }
    vertical(buf, pos, pos.line + 1);
}

fn vertical(buf: &Buffer, pos: &mut Position, target: usize) {
    let col = buf
        .line(pos.line)
        .map(|l| grapheme::visual_col(l, pos.byte))
        .unwrap_or(0);
    pos.line = target;
    pos.byte = buf
        .line(target)
        .map(|l| grapheme::byte_for_visual_col(l, col))
        .unwrap_or(0);
}

/// Move to the start of the next whitespace-delimited word on the current line.
/// Skips the rest of the current word, then the blank run after it. Clamps to
/// the end of the line when no further word starts.
pub fn word_forward(buf: &Buffer, pos: &mut Position) {
    let Some(line) = buf.line(pos.line) else {
        return;
    };
    let mut byte = pos.byte.min(line.len());
    while byte < line.len() {
        let next = grapheme::next_boundary(line, byte);
        if grapheme::is_blank(&line[byte..next]) {
            break;
        }
        byte = next;
    }
    while byte < line.len() {
        let next = grapheme::next_boundary(line, byte);
        if !grapheme::is_blank(&line[byte..next]) {
            break;
        }
        byte = next;
    }
    pos.byte = byte;
}

/// Move to the start of the previous whitespace-delimited word on the current
/// line. Clamps to column 0 when no earlier word starts.
pub fn word_backward(buf: &Buffer, pos: &mut Position) {
    let Some(line) = buf.line(pos.line) else {
        return;
    };
    let mut byte = pos.byte.min(line.len());
    while byte > 0 {
        let prev = grapheme::prev_boundary(line, byte);
        if !grapheme::is_blank(&line[prev..byte]) {
            break;
        }
        byte = prev;
    }
    while byte > 0 {
        let prev = grapheme::prev_boundary(line, byte);
        if grapheme::is_blank(&line[prev..byte]) {
            break;
        }
        byte = prev;
    }
    pos.byte = byte;
}
