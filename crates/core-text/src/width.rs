//! Grapheme cluster display width.
//!
//! `egc_width` is the single authority for terminal cell width of one
//! extended grapheme cluster. The cursor model is byte based; only rendering
//! (gutter alignment, clipping, horizontal scroll) consults display width.
//!
//! Policy:
//! 1. Control clusters (tab, stray C0 bytes) render as a single substituted cell.
//! 2. Emoji presentation sequences (VS16 or ZWJ joined pictographs) are wide.
//! 3. Everything else follows `unicode-width`, clamped to `1..=2` so a
//!    zero-width cluster never collapses a cell.

use unicode_width::UnicodeWidthStr;

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';

fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

/// Terminal cell width of a single grapheme cluster.
pub fn egc_width(egc: &str) -> u16 {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if first.is_control() {
        return 1;
    }
    if is_extended_pictographic(first) && egc.chars().any(|c| c == VS16 || c == ZWJ) {
        return 2;
    }
    UnicodeWidthStr::width(egc).clamp(1, 2) as u16
}
