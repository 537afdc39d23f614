//! Key model and raw terminal chunk decoder.
//!
//! Raw input arrives as text chunks: printable characters (possibly
//! multi-byte), single control bytes, and ANSI escape sequences for the arrow
//! keys, all interleaved in one stream. `KeyDecoder` turns each chunk into an
//! ordered list of `Key` values so the mode state machine never matches on
//! reassembled escape strings.
//!
//! Decoding rules:
//! * A run of printable characters stays one `Key::Printable` unit, so a CJK
//!   character or an IME commit is never split.
//! * Every C0 control byte (and DEL) is its own `Key::Control`, except that a
//!   `\r\n` pair is a single Enter.
//! * `ESC [ A..D` / `ESC O A..D` (with optional parameters) become `Key::Arrow`.
//!   Other known CSI/SS3 sequences become `Key::Unsupported`. Without
//!   parameters only the final bytes terminals send for keys (`A..D H F Z`,
//!   `P..S` after `O`) form a sequence; anything else after `ESC` is an
//!   Escape key followed by ordinary text.
//! * A trailing `ESC [` with no final byte is held until the next chunk.
//!   A lone trailing `ESC` is the Escape key.
//!
//! Bracketed paste payloads are text, not keystrokes: `paste_keys` keeps
//! their line breaks inside one `Key::Printable`.

use std::sync::atomic::{AtomicU64, Ordering};

pub static KEYS_DECODED: AtomicU64 = AtomicU64::new(0);
pub static UNSUPPORTED_SEQUENCES: AtomicU64 = AtomicU64::new(0);

/// Named control byte values.
pub mod control {
    pub const CTRL_C: u8 = 0x03;
    pub const BACKSPACE_BS: u8 = 0x08;
    pub const TAB: u8 = 0x09;
    pub const LINE_FEED: u8 = 0x0A;
    pub const CARRIAGE_RETURN: u8 = 0x0D;
    pub const CTRL_R: u8 = 0x12;
    pub const ESC: u8 = 0x1B;
    pub const DEL: u8 = 0x7F;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One logical keystroke (or printable unit) delivered to the mode state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Printable text; may hold several characters when delivered as one unit.
    Printable(String),
    Arrow(Direction),
    /// A single C0 control byte or DEL.
    Control(u8),
    /// A recognized-but-unhandled escape sequence (Home, F-keys, Alt chords...).
    Unsupported(String),
}

impl Key {
    pub fn printable(text: impl Into<String>) -> Self {
        Key::Printable(text.into())
    }

    pub fn is_interrupt(&self) -> bool {
        matches!(self, Key::Control(control::CTRL_C))
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, Key::Control(control::ESC))
    }

    pub fn is_enter(&self) -> bool {
        matches!(
            self,
            Key::Control(control::CARRIAGE_RETURN | control::LINE_FEED)
        )
    }

    pub fn is_backspace(&self) -> bool {
        matches!(self, Key::Control(control::DEL | control::BACKSPACE_BS))
    }
}

/// Stateful decoder; holds an incomplete escape sequence across chunk boundaries.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: String,
    /// The previous chunk ended in `\r`; a leading `\n` completes that Enter.
    trailing_cr: bool,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when an unterminated escape sequence is being held.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Decode one raw chunk into keys, in stream order.
    pub fn decode(&mut self, chunk: &str) -> Vec<Key> {
        let input = if self.pending.is_empty() {
            chunk.to_string()
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.push_str(chunk);
            joined
        };

        let mut keys = Vec::new();
        let mut run = String::new();
        let mut rest = input.as_str();
        if std::mem::take(&mut self.trailing_cr) && rest.starts_with('\n') {
            rest = &rest[1..];
        }
        while let Some(c) = rest.chars().next() {
            if c == '\u{1b}' {
                flush_run(&mut run, &mut keys);
                match parse_escape(rest) {
                    Escape::Complete(key, used) => {
                        keys.push(key);
                        rest = &rest[used..];
                    }
                    Escape::Incomplete => {
                        self.pending = rest.to_string();
                        tracing::trace!(target: "input.decode", held = self.pending.len(), "escape_pending");
                        break;
                    }
                    Escape::Lone => {
                        keys.push(Key::Control(control::ESC));
                        rest = &rest[1..];
                    }
                }
                continue;
            }
            if c == '\r' && rest[1..].starts_with('\n') {
                flush_run(&mut run, &mut keys);
                keys.push(Key::Control(control::CARRIAGE_RETURN));
                rest = &rest[2..];
                continue;
            }
            if c.is_ascii_control() {
                flush_run(&mut run, &mut keys);
                keys.push(Key::Control(c as u8));
            } else {
                run.push(c);
            }
            rest = &rest[c.len_utf8()..];
        }
        flush_run(&mut run, &mut keys);
        self.trailing_cr = !self.has_pending() && input.ends_with('\r');

        KEYS_DECODED.fetch_add(keys.len() as u64, Ordering::Relaxed);
        keys
    }
}

/// Keys for a bracketed paste payload. Line breaks and tabs stay in the
/// text; other control bytes (including stray escapes) are dropped.
pub fn paste_keys(payload: &str) -> Vec<Key> {
    let text: String = payload
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect();
    if text.is_empty() {
        return Vec::new();
    }
    KEYS_DECODED.fetch_add(1, Ordering::Relaxed);
    vec![Key::Printable(text)]
}

fn flush_run(run: &mut String, keys: &mut Vec<Key>) {
    if !run.is_empty() {
        keys.push(Key::Printable(std::mem::take(run)));
    }
}

enum Escape {
    /// Decoded key plus number of bytes consumed.
    Complete(Key, usize),
    Incomplete,
    Lone,
}

/// Parse an escape sequence at the start of `s` (which begins with ESC).
fn parse_escape(s: &str) -> Escape {
    let bytes = s.as_bytes();
    let introducer = match bytes.get(1) {
        None => return Escape::Lone,
        Some(b) => *b,
    };
    if introducer != b'[' && introducer != b'O' {
        return Escape::Lone;
    }
    // Parameter and intermediate bytes (0x20..=0x3F), then one final byte (0x40..=0x7E).
    let mut idx = 2;
    while let Some(&b) = bytes.get(idx) {
        match b {
            0x20..=0x3F => idx += 1,
            0x40..=0x7E if idx == 2 && !bare_final(introducer, b) => return Escape::Lone,
            0x40..=0x7E => {
                let used = idx + 1;
                let key = match b {
                    b'A' => Key::Arrow(Direction::Up),
                    b'B' => Key::Arrow(Direction::Down),
                    b'C' => Key::Arrow(Direction::Right),
                    b'D' => Key::Arrow(Direction::Left),
                    _ => {
                        UNSUPPORTED_SEQUENCES.fetch_add(1, Ordering::Relaxed);
                        tracing::trace!(target: "input.decode", len = used, "unsupported_sequence");
                        Key::Unsupported(s[..used].to_string())
                    }
                };
                return Escape::Complete(key, used);
            }
            _ => return Escape::Lone,
        }
    }
    Escape::Incomplete
}

/// Final bytes that form a key sequence with no parameter bytes.
fn bare_final(introducer: u8, b: u8) -> bool {
    match introducer {
        b'[' => matches!(b, b'A'..=b'D' | b'H' | b'F' | b'Z'),
        _ => matches!(b, b'A'..=b'D' | b'H' | b'F' | b'P'..=b'S'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(chunk: &str) -> Vec<Key> {
        KeyDecoder::new().decode(chunk)
    }

    #[test]
    fn printable_run_stays_one_unit() {
        assert_eq!(decode("漢字"), vec![Key::printable("漢字")]);
        assert_eq!(decode("a"), vec![Key::printable("a")]);
    }

    #[test]
    fn arrow_sequences_decode_to_directions() {
        assert_eq!(
            decode("\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                Key::Arrow(Direction::Up),
                Key::Arrow(Direction::Down),
                Key::Arrow(Direction::Right),
                Key::Arrow(Direction::Left),
            ]
        );
        assert_eq!(decode("\x1bOA"), vec![Key::Arrow(Direction::Up)]);
        assert_eq!(decode("\x1b[1;5C"), vec![Key::Arrow(Direction::Right)]);
    }

    #[test]
    fn control_bytes_split_printable_runs() {
        assert_eq!(
            decode("ab\rcd\x7f"),
            vec![
                Key::printable("ab"),
                Key::Control(control::CARRIAGE_RETURN),
                Key::printable("cd"),
                Key::Control(control::DEL),
            ]
        );
    }

    #[test]
    fn lone_escape_is_escape_key() {
        let keys = decode("\x1b");
        assert_eq!(keys, vec![Key::Control(control::ESC)]);
        assert!(keys[0].is_escape());
        assert_eq!(
            decode("\x1bj"),
            vec![Key::Control(control::ESC), Key::printable("j")]
        );
    }

    #[test]
    fn unknown_csi_is_unsupported() {
        assert_eq!(decode("\x1b[3~"), vec![Key::Unsupported("\x1b[3~".into())]);
    }

    #[test]
    fn split_sequence_is_held_across_chunks() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.decode("x\x1b["), vec![Key::printable("x")]);
        assert!(decoder.has_pending());
        assert_eq!(decoder.decode("A"), vec![Key::Arrow(Direction::Up)]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn crlf_is_one_enter() {
        assert_eq!(
            decode("one\r\ntwo"),
            vec![
                Key::printable("one"),
                Key::Control(control::CARRIAGE_RETURN),
                Key::printable("two"),
            ]
        );
        assert_eq!(
            decode("\r\r"),
            vec![
                Key::Control(control::CARRIAGE_RETURN),
                Key::Control(control::CARRIAGE_RETURN),
            ]
        );
    }

    #[test]
    fn crlf_split_across_chunks_is_one_enter() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(
            decoder.decode("one\r"),
            vec![Key::printable("one"), Key::Control(control::CARRIAGE_RETURN)]
        );
        assert_eq!(decoder.decode("\ntwo"), vec![Key::printable("two")]);
        assert_eq!(decoder.decode("\n"), vec![Key::Control(control::LINE_FEED)]);
    }

    #[test]
    fn escape_then_bracket_text_is_not_a_sequence() {
        assert_eq!(
            decode("\x1b[x"),
            vec![Key::Control(control::ESC), Key::printable("[x")]
        );
        assert_eq!(
            decode("\x1bOk"),
            vec![Key::Control(control::ESC), Key::printable("Ok")]
        );
        assert_eq!(decode("\x1b[Z"), vec![Key::Unsupported("\x1b[Z".into())]);
        assert_eq!(decode("\x1bOP"), vec![Key::Unsupported("\x1bOP".into())]);
    }

    #[test]
    fn paste_keeps_line_breaks_in_one_unit() {
        assert_eq!(
            paste_keys("one\r\ntwo\x1b\tend"),
            vec![Key::printable("one\r\ntwo\tend")]
        );
        assert_eq!(paste_keys("\x07"), Vec::<Key>::new());
    }

    #[test]
    fn key_predicates() {
        assert!(Key::Control(control::CTRL_C).is_interrupt());
        assert!(Key::Control(control::LINE_FEED).is_enter());
        assert!(Key::Control(control::BACKSPACE_BS).is_backspace());
        assert!(!Key::printable("q").is_escape());
    }
}
