//! Span styling for composed rows.
//!
//! A `Span` is a run of already-clipped display text sharing one set of
//! `SpanFlags`. Spans never split a grapheme cluster: the composer builds
//! them cluster by cluster and merges neighbours with identical flags.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpanFlags: u8 {
        const REVERSE   = 0b0000_0001; // software cursor
        const CURSOR_LINE = 0b0000_0010; // remainder of the cursor's line
        const SELECTION = 0b0000_0100; // visual line range
        const DIM       = 0b0000_1000; // gutter, rules, hints
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub flags: SpanFlags,
}

impl Span {
    pub fn new(text: impl Into<String>, flags: SpanFlags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanFlags::empty())
    }
}

/// One screen row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub spans: Vec<Span>,
}

impl Row {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut row = Row::default();
        row.push(&text, SpanFlags::empty());
        row
    }

    /// Append text, extending the last span when the flags match.
    pub fn push(&mut self, text: &str, flags: SpanFlags) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut()
            && last.flags == flags
        {
            last.text.push_str(text);
            return;
        }
        self.spans.push(Span::new(text, flags));
    }

    /// Concatenated text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Text of every span carrying all of `flags`.
    pub fn text_with(&self, flags: SpanFlags) -> String {
        self.spans
            .iter()
            .filter(|s| s.flags.contains(flags))
            .map(|s| s.text.as_str())
            .collect()
    }
}
