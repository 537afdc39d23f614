//! Normalization + segmentation adapter for inserted text.
//!
//! Contract:
//! - Input: raw text received from the terminal (typed key, IME commit, paste).
//! - Output: NFC-normalized string plus its grapheme clusters with byte ranges
//!   and display widths.
//! - Does not log content.

use crate::egc_width;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub cluster: String,
    pub start: usize, // byte offset in normalized string (inclusive)
    pub end: usize,   // byte offset in normalized string (exclusive)
    pub width: u16,
}

/// Normalize to NFC.
pub fn normalize(input: &str) -> String {
    input.nfc().collect()
}

/// Segment already-normalized text into grapheme clusters.
pub fn segment(text: &str) -> Vec<Segment> {
    text.grapheme_indices(true)
        .map(|(start, g)| Segment {
            cluster: g.to_string(),
            start,
            end: start + g.len(),
            width: egc_width(g),
        })
        .collect()
}
