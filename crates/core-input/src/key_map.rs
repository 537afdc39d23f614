use core_events::{Direction, Key, control};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// What a crossterm event contributes to the key stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mapped {
    Key(Key),
    /// Bracketed paste payload, delivered as text with its line breaks.
    Paste(String),
    Ignored,
}

pub(crate) fn map_event(event: CEvent) -> Mapped {
    match event {
        CEvent::Key(key) => map_key_event(&key).map_or(Mapped::Ignored, Mapped::Key),
        CEvent::Paste(data) => Mapped::Paste(data),
        _ => Mapped::Ignored,
    }
}

/// Map a crossterm key press into the byte-level key model.
///
/// Releases are dropped. Control chords on ASCII letters become their C0 byte
/// (`Ctrl+C` -> 0x03, `Ctrl+R` -> 0x12).
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<Key> {
    if !matches!(event.kind, CKeyEventKind::Press | CKeyEventKind::Repeat) {
        return None;
    }
    let key = match event.code {
        CKeyCode::Char(c) if event.modifiers.contains(CKeyModifiers::CONTROL) => {
            if !c.is_ascii_alphabetic() {
                return Some(Key::Unsupported(format!("ctrl+{c}")));
            }
            Key::Control(c.to_ascii_lowercase() as u8 & 0x1f)
        }
        CKeyCode::Char(c) => Key::Printable(c.to_string()),
        CKeyCode::Enter => Key::Control(control::CARRIAGE_RETURN),
        CKeyCode::Esc => Key::Control(control::ESC),
        CKeyCode::Backspace => Key::Control(control::DEL),
        CKeyCode::Tab => Key::Control(control::TAB),
        CKeyCode::Up => Key::Arrow(Direction::Up),
        CKeyCode::Down => Key::Arrow(Direction::Down),
        CKeyCode::Left => Key::Arrow(Direction::Left),
        CKeyCode::Right => Key::Arrow(Direction::Right),
        CKeyCode::Modifier(_) | CKeyCode::Null => return None,
        other => Key::Unsupported(format!("{other:?}")),
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: CKeyCode, modifiers: CKeyModifiers) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers,
            kind: CKeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn printable_chars_map_to_printable_keys() {
        let ev = press(CKeyCode::Char('漢'), CKeyModifiers::NONE);
        assert_eq!(map_key_event(&ev), Some(Key::printable("漢")));
        let ev = press(CKeyCode::Char('Z'), CKeyModifiers::SHIFT);
        assert_eq!(map_key_event(&ev), Some(Key::printable("Z")));
    }

    #[test]
    fn control_chords_map_to_c0_bytes() {
        let ev = press(CKeyCode::Char('c'), CKeyModifiers::CONTROL);
        assert_eq!(map_key_event(&ev), Some(Key::Control(control::CTRL_C)));
        let ev = press(CKeyCode::Char('R'), CKeyModifiers::CONTROL | CKeyModifiers::SHIFT);
        assert_eq!(map_key_event(&ev), Some(Key::Control(control::CTRL_R)));
    }

    #[test]
    fn named_keys_map_to_control_bytes_and_arrows() {
        let cases = [
            (CKeyCode::Enter, Key::Control(control::CARRIAGE_RETURN)),
            (CKeyCode::Esc, Key::Control(control::ESC)),
            (CKeyCode::Backspace, Key::Control(control::DEL)),
            (CKeyCode::Left, Key::Arrow(Direction::Left)),
        ];
        for (code, expected) in cases {
            assert_eq!(map_key_event(&press(code, CKeyModifiers::NONE)), Some(expected));
        }
    }

    #[test]
    fn releases_are_dropped_and_unknown_keys_flagged() {
        let mut ev = press(CKeyCode::Char('a'), CKeyModifiers::NONE);
        ev.kind = CKeyEventKind::Release;
        assert_eq!(map_key_event(&ev), None);
        let ev = press(CKeyCode::Home, CKeyModifiers::NONE);
        assert!(matches!(map_key_event(&ev), Some(Key::Unsupported(_))));
    }

    #[test]
    fn paste_is_kept_as_text() {
        assert_eq!(
            map_event(CEvent::Paste("a\nb".into())),
            Mapped::Paste("a\nb".into())
        );
        assert_eq!(map_event(CEvent::FocusGained), Mapped::Ignored);
    }
}
