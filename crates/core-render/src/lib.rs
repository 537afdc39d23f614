//! Frame composition and emission.
//!
//! Rendering is split in two:
//! * `compose_frame` is a pure function of `EditorState` and `RenderOptions`
//!   producing a `Frame` of styled rows (title, rule, viewport, rule, status,
//!   hint). It never touches the terminal, so every layout rule is testable.
//! * `emit_frame` (see `writer`) clears the screen and prints the frame through
//!   queued crossterm commands with a single flush.
//!
//! Layout rules:
//! - The viewport shows at most `max_lines` buffer lines centered on the cursor.
//! - Each line may carry a right-aligned 1-based line number gutter.
//! - The cursor cluster is reverse video; the rest of its line is highlighted.
//!   A cursor resting after the last character is drawn as a reversed blank.
//! - In Visual mode every line of the normalized selection has a selection
//!   background.
//! - Lines wider than the terminal are clipped; a shared horizontal offset keeps
//!   the cursor visible. Widths are display cells from `core_text::egc_width`.
//! - Tabs and other control characters occupy a single cell.
//! - The hint row shows the transient message when one is set.

use core_state::EditorState;
use core_text::grapheme;
use core_text::segment::segment;
use tracing::trace;

pub mod status;
pub mod style;
pub mod viewport;
pub mod writer;

pub use status::{StatusContext, build_status, format_title, hint_for};
pub use style::{Row, Span, SpanFlags};
pub use viewport::Viewport;
pub use writer::emit_frame;

const RULE: &str = "─";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_lines: u16,
    pub columns: u16,
    pub line_numbers: bool,
    pub hints: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_lines: 20,
            columns: 80,
            line_numbers: true,
            hints: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
}

impl Frame {
    pub fn row_texts(&self) -> Vec<String> {
        self.rows.iter().map(Row::text).collect()
    }

    /// Buffer rows only (between the two rules).
    pub fn viewport_rows(&self) -> &[Row] {
        let end = self.rows.len().saturating_sub(3);
        self.rows.get(2..end).unwrap_or(&[])
    }

    pub fn title(&self) -> String {
        self.rows.first().map(Row::text).unwrap_or_default()
    }

    pub fn status(&self) -> String {
        self.rows
            .len()
            .checked_sub(2)
            .and_then(|i| self.rows.get(i))
            .map(Row::text)
            .unwrap_or_default()
    }

    pub fn hint(&self) -> String {
        self.rows.last().map(Row::text).unwrap_or_default()
    }
}

pub fn compose_frame(state: &EditorState, opts: &RenderOptions) -> Frame {
    let cols = opts.columns.max(1) as usize;
    let total = state.buffer.line_count();
    let mut rows = Vec::with_capacity(opts.max_lines as usize + 5);

    rows.push(Row::plain(clip(
        &format_title(state.file_name.as_deref(), state.is_saved()),
        cols,
    )));
    rows.push(rule(cols));

    let gutter = if opts.line_numbers {
        total.to_string().len() + 1
    } else {
        0
    };
    let cursor_line = state.buffer.line(state.cursor.line).unwrap_or("");
    let cursor_col = grapheme::visual_col(cursor_line, state.cursor.byte);
    let next = grapheme::next_boundary(cursor_line, state.cursor.byte);
    let cursor_width = cursor_line
        .get(state.cursor.byte..next)
        .filter(|g| !g.is_empty())
        .map_or(1, |g| core_text::egc_width(g).max(1) as usize);

    let mut vp = Viewport::centered(state.cursor.line, total, opts.max_lines as usize);
    vp.scroll_to_column(cursor_col, cursor_width, cols.saturating_sub(gutter));

    let selection = state.selection_range();
    for idx in vp.lines() {
        let mut row = Row::default();
        if gutter > 0 {
            row.push(&format!("{:>w$} ", idx + 1, w = gutter - 1), SpanFlags::DIM);
        }
        let mut base = SpanFlags::empty();
        if selection.as_ref().is_some_and(|r| r.contains(&idx)) {
            base |= SpanFlags::SELECTION;
        }
        let cursor_byte = (idx == state.cursor.line).then_some(state.cursor.byte);
        if cursor_byte.is_some() {
            base |= SpanFlags::CURSOR_LINE;
        }
        push_line(&mut row, state.buffer.line(idx).unwrap_or(""), &vp, base, cursor_byte);
        rows.push(row);
    }

    rows.push(rule(cols));
    let status = build_status(&StatusContext {
        mode: state.mode,
        line: state.cursor.line,
        col: grapheme::cluster_index(cursor_line, state.cursor.byte),
        total_lines: total,
        command_buffer: state.command_line.buffer(),
    });
    rows.push(Row::plain(clip(&status, cols)));

    let hint_row = match (&state.message, opts.hints) {
        (Some(msg), _) => Row::plain(clip(msg, cols)),
        (None, true) => Row {
            spans: vec![Span::new(clip(hint_for(state.mode), cols), SpanFlags::DIM)],
        },
        (None, false) => Row::default(),
    };
    rows.push(hint_row);

    trace!(
        target: "render",
        rows = rows.len(),
        first_line = vp.first_line,
        left_col = vp.left_col,
        "frame_composed"
    );
    Frame { rows }
}

fn rule(cols: usize) -> Row {
    Row {
        spans: vec![Span::new(RULE.repeat(cols), SpanFlags::DIM)],
    }
}

fn push_line(row: &mut Row, line: &str, vp: &Viewport, base: SpanFlags, cursor: Option<usize>) {
    let right = vp.left_col.saturating_add(vp.text_cols);
    let mut col = 0usize;
    let mut cursor_drawn = false;
    for seg in segment(line) {
        let start = col;
        col += (seg.width as usize).max(1);
        if start < vp.left_col {
            // Wide cluster cut by the left edge: keep alignment with blanks.
            if col > vp.left_col {
                row.push(&" ".repeat(col - vp.left_col), base);
            }
            continue;
        }
        if col > right {
            break;
        }
        let flags = if cursor == Some(seg.start) {
            cursor_drawn = true;
            base | SpanFlags::REVERSE
        } else {
            base
        };
        row.push(display_cluster(&seg.cluster), flags);
    }
    if let Some(byte) = cursor
        && !cursor_drawn
        && byte >= line.len()
    {
        row.push(" ", base | SpanFlags::REVERSE);
    }
}

fn display_cluster(g: &str) -> &str {
    if !g.chars().any(char::is_control) {
        g
    } else if g == "\t" {
        " "
    } else {
        "?"
    }
}

/// Truncate to at most `cols` display cells without splitting a cluster.
fn clip(s: &str, cols: usize) -> String {
    let mut out = String::with_capacity(s.len().min(cols * 4));
    let mut used = 0usize;
    for g in grapheme::iter(s) {
        let w = core_text::egc_width(g) as usize;
        if used + w > cols {
            break;
        }
        used += w;
        out.push_str(display_cluster(g));
    }
    out
}
