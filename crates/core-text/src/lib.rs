//! Line-vector text buffer and cursor position model.
//!
//! The buffer is an ordered list of lines without terminators. It never holds
//! zero lines: removing every line collapses it to a single empty line.
//!
//! Positions are `(line, byte)` pairs where `byte` is an offset into the line's
//! UTF-8 content. Editing operations keep `byte` on a grapheme boundary and
//! within `0..=line_len`, where `line_len` (the "after last character" slot)
//! is a valid resting place.

use std::ops::RangeInclusive;

pub mod motion;
pub mod segment;
pub mod width;

pub use width::egc_width;

/// A text buffer: one `String` per line, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

/// A position inside a buffer expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }
}

impl Buffer {
    /// Build a buffer from host-supplied text. `\r\n` and lone `\r` count as line breaks.
    pub fn from_text(content: &str) -> Self {
        let normalized = normalize_line_breaks(content);
        Self::from_lines(normalized.split('\n').map(str::to_string).collect())
    }

    /// Build a buffer from pre-split lines; an empty vector becomes one empty line.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return Self::default();
        }
        Self { lines }
    }

    /// Join all lines with `\n` (no trailing newline added).
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Total number of lines in the buffer (always >= 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Byte length of a line; 0 for out-of-range indices.
    pub fn line_byte_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map(String::len).unwrap_or(0)
    }

    /// Clamp a position into the buffer: line into range, byte onto a grapheme
    /// boundary no further than the line end.
    pub fn clamp(&self, pos: &mut Position) {
        if pos.line >= self.lines.len() {
            pos.line = self.lines.len() - 1;
        }
        let line = &self.lines[pos.line];
        if pos.byte >= line.len() {
            pos.byte = line.len();
        } else if !grapheme::is_boundary(line, pos.byte) {
            pos.byte = grapheme::prev_boundary(line, pos.byte);
        }
    }

    /// Splice `text` into the line at `pos`; advances `pos` by the inserted byte length.
    /// `text` must not contain line breaks.
    pub fn insert_str(&mut self, pos: &mut Position, text: &str) {
        debug_assert!(!text.contains('\n'));
        let line = &mut self.lines[pos.line];
        line.insert_str(pos.byte, text);
        pos.byte += text.len();
    }

    /// Split the line at `pos`; the tail becomes a new line below and `pos` moves to its start.
    pub fn split_line(&mut self, pos: &mut Position) {
        let tail = self.lines[pos.line].split_off(pos.byte);
        self.lines.insert(pos.line + 1, tail);
        pos.line += 1;
        pos.byte = 0;
    }

    /// Backspace semantics. Inside a line removes the grapheme before `pos`; at
    /// column 0 of a non-first line appends the line to the previous one and
    /// leaves `pos` at the join point. Returns true when the buffer changed.
    pub fn delete_grapheme_before(&mut self, pos: &mut Position) -> bool {
        if pos.byte == 0 {
            if pos.line == 0 {
                return false;
            }
            let current = self.lines.remove(pos.line);
            pos.line -= 1;
            let prev = &mut self.lines[pos.line];
            pos.byte = prev.len();
            prev.push_str(&current);
            return true;
        }
        let line = &mut self.lines[pos.line];
        let prev = grapheme::prev_boundary(line, pos.byte);
        line.replace_range(prev..pos.byte, "");
        pos.byte = prev;
        true
    }

    /// Remove the grapheme under `pos`. No-op (returns `None`) at end of line.
    pub fn delete_grapheme_at(&mut self, pos: &Position) -> Option<String> {
        let line = &mut self.lines[pos.line];
        if pos.byte >= line.len() {
            return None;
        }
        let next = grapheme::next_boundary(line, pos.byte);
        Some(line.drain(pos.byte..next).collect())
    }

    /// Insert an empty line so that it lands at index `at` (`at` may equal `line_count`).
    pub fn insert_empty_line(&mut self, at: usize) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, String::new());
    }

    /// Insert `lines` so the first lands at index `at`.
    pub fn insert_lines(&mut self, at: usize, lines: &[String]) {
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, lines.iter().cloned());
    }

    /// Copy an inclusive line range (clamped to the buffer).
    pub fn copy_lines(&self, range: RangeInclusive<usize>) -> Vec<String> {
        let (start, end) = self.clamp_range(range);
        self.lines[start..=end].to_vec()
    }

    /// Remove an inclusive line range and return it. Removing every line leaves
    /// a single empty line behind.
    pub fn remove_lines(&mut self, range: RangeInclusive<usize>) -> Vec<String> {
        let (start, end) = self.clamp_range(range);
        let removed: Vec<String> = self.lines.drain(start..=end).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        removed
    }

    fn clamp_range(&self, range: RangeInclusive<usize>) -> (usize, usize) {
        let last = self.lines.len() - 1;
        let start = (*range.start()).min(last);
        let end = (*range.end()).clamp(start, last);
        (start, end)
    }
}

/// Collapse `\r\n` and lone `\r` into `\n`.
pub fn normalize_line_breaks(input: &str) -> String {
    if !input.contains('\r') {
        return input.to_string();
    }
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// Grapheme and width utilities. Pure helpers operating on a single line.
pub mod grapheme {
    use crate::egc_width;
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate grapheme clusters in a line.
    pub fn iter(line: &str) -> impl Iterator<Item = &str> {
        line.graphemes(true)
    }

    /// True when `byte` starts a grapheme cluster (or equals the line length).
    pub fn is_boundary(line: &str, byte: usize) -> bool {
        if byte == 0 || byte == line.len() {
            return true;
        }
        line.grapheme_indices(true).any(|(idx, _)| idx == byte)
    }

    /// Previous grapheme boundary (returns 0 if already at or below 1st boundary).
    pub fn prev_boundary(line: &str, byte: usize) -> usize {
        if byte == 0 {
            return 0;
        }
        let byte = byte.min(line.len());
        let mut last = 0;
        for (idx, _) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next grapheme boundary (returns line.len() if at or beyond end).
    pub fn next_boundary(line: &str, byte: usize) -> usize {
        if byte >= line.len() {
            return line.len();
        }
        for (idx, _) in line.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        line.len()
    }

    /// Compute visual column (terminal cells) up to (but not including) byte offset.
    pub fn visual_col(line: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            col += egc_width(g) as usize;
        }
        col
    }

    /// Number of grapheme clusters before `byte`.
    pub fn cluster_index(line: &str, byte: usize) -> usize {
        line.grapheme_indices(true)
            .take_while(|(idx, _)| *idx < byte)
            .count()
    }

    /// Byte offset of the cluster covering visual column `target`, clamped to line end.
    pub fn byte_for_visual_col(line: &str, target: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            let w = egc_width(g) as usize;
            if col + w > target {
                return idx;
            }
            col += w;
        }
        line.len()
    }

    /// Whitespace classification used by word motions.
    pub fn is_blank(g: &str) -> bool {
        g.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::grapheme;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_yields_single_empty_line() {
        let b = Buffer::from_text("");
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), Some(""));
    }

    #[test]
    fn from_text_splits_and_normalizes_crlf() {
        let b = Buffer::from_text("one\r\ntwo\rthree\n");
        assert_eq!(b.lines(), &["one", "two", "three", ""]);
        assert_eq!(b.text(), "one\ntwo\nthree\n");
    }

    #[test]
    fn insert_str_middle_advances_by_unit_length() {
        let mut b = Buffer::from_text("abc");
        let mut pos = Position::new(0, 1);
        b.insert_str(&mut pos, "漢");
        assert_eq!(b.line(0), Some("a漢bc"));
        assert_eq!(pos.byte, 1 + "漢".len());
    }

    #[test]
    fn split_line_recovers_original_when_joined() {
        let mut b = Buffer::from_text("abcde");
        let mut pos = Position::new(0, 2);
        b.split_line(&mut pos);
        assert_eq!(b.lines(), &["ab", "cde"]);
        assert_eq!(pos, Position::new(1, 0));
        assert_eq!(b.lines().concat(), "abcde");
    }

    #[test]
    fn backspace_removes_whole_cluster() {
        let mut b = Buffer::from_text("ab😀c");
        let mut pos = Position::new(0, b.line_byte_len(0));
        assert!(b.delete_grapheme_before(&mut pos));
        assert!(b.delete_grapheme_before(&mut pos));
        assert_eq!(b.line(0), Some("ab"));
        assert_eq!(pos.byte, 2);
    }

    #[test]
    fn backspace_at_line_start_joins_at_previous_length() {
        let mut b = Buffer::from_text("ab\ncd");
        let mut pos = Position::new(1, 0);
        assert!(b.delete_grapheme_before(&mut pos));
        assert_eq!(b.lines(), &["abcd"]);
        assert_eq!(pos, Position::new(0, 2));
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut b = Buffer::from_text("ab");
        let mut pos = Position::origin();
        assert!(!b.delete_grapheme_before(&mut pos));
        assert_eq!(b.lines(), &["ab"]);
    }

    #[test]
    fn delete_grapheme_at_end_noop() {
        let mut b = Buffer::from_text("hi");
        assert_eq!(b.delete_grapheme_at(&Position::new(0, 2)), None);
        assert_eq!(b.delete_grapheme_at(&Position::new(0, 0)), Some("h".into()));
        assert_eq!(b.line(0), Some("i"));
    }

    #[test]
    fn remove_all_lines_leaves_one_empty_line() {
        let mut b = Buffer::from_text("1\n2\n3");
        let removed = b.remove_lines(0..=2);
        assert_eq!(removed, vec!["1", "2", "3"]);
        assert_eq!(b.lines(), &[""]);
    }

    #[test]
    fn insert_lines_at_end_and_middle() {
        let mut b = Buffer::from_text("a\nc");
        b.insert_lines(1, &["b".to_string()]);
        b.insert_lines(3, &["d".to_string()]);
        assert_eq!(b.lines(), &["a", "b", "c", "d"]);
    }

    #[test]
    fn clamp_snaps_into_cluster_boundary() {
        let b = Buffer::from_text("a漢\nxy");
        let mut pos = Position::new(0, 2);
        b.clamp(&mut pos);
        assert_eq!(pos, Position::new(0, 1));
        let mut far = Position::new(9, 9);
        b.clamp(&mut far);
        assert_eq!(far, Position::new(1, 2));
    }

    #[test]
    fn grapheme_combining_mark_is_one_cluster() {
        let s = "e\u{0301}x";
        let nb = grapheme::next_boundary(s, 0);
        assert_eq!(nb, 3);
        assert_eq!(grapheme::prev_boundary(s, nb), 0);
        assert!(!grapheme::is_boundary(s, 1));
    }

    #[test]
    fn visual_col_counts_wide_cjk_twice() {
        let s = "a漢字b";
        let after_cjk = 1 + "漢字".len();
        assert_eq!(grapheme::visual_col(s, after_cjk), 5);
        assert_eq!(grapheme::cluster_index(s, after_cjk), 3);
        assert_eq!(grapheme::byte_for_visual_col(s, 2), 1);
        assert_eq!(grapheme::byte_for_visual_col(s, 99), s.len());
    }
}
