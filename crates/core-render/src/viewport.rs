//! Visible window into the buffer.
//!
//! Vertically the window is centered on the cursor line and shifted back
//! inside the buffer near either end. Horizontally a single column offset is
//! shared by every visible line and chosen so the cursor cell stays on
//! screen; offsets are display columns, not bytes.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_line: usize,
    pub height: usize,
    /// Leftmost display column shown.
    pub left_col: usize,
    /// Display columns available for line text (after the gutter).
    pub text_cols: usize,
}

impl Viewport {
    /// Window of at most `max_lines` rows centered on `cursor_line`.
    pub fn centered(cursor_line: usize, total_lines: usize, max_lines: usize) -> Self {
        let height = max_lines.max(1).min(total_lines.max(1));
        let half = height / 2;
        let first_line = cursor_line
            .saturating_sub(half)
            .min(total_lines.saturating_sub(height));
        Self {
            first_line,
            height,
            left_col: 0,
            text_cols: usize::MAX,
        }
    }

    pub fn lines(&self) -> Range<usize> {
        self.first_line..self.first_line + self.height
    }

    /// Shift horizontally so display column `cursor_col` (one cell wide) fits.
    pub fn scroll_to_column(&mut self, cursor_col: usize, cursor_width: usize, text_cols: usize) {
        let text_cols = text_cols.max(1);
        self.text_cols = text_cols;
        let right = cursor_col + cursor_width.max(1);
        self.left_col = right.saturating_sub(text_cols);
    }
}
