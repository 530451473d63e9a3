use std::collections::VecDeque;

use crossterm::event::{self, KeyEvent, KeyEventKind};

use crate::key::{Key, KeyCode, KeyModifier};

pub fn from_keycode_string(keycodes: &str) -> VecDeque<Key> {
    let mut keys = VecDeque::new();

    let regex = match regex::Regex::new(r"<[^>]*>|.") {
        Ok(it) => it,
        Err(error) => {
            tracing::error!("compiling keycode regex failed: {:?}", error);
            return keys;
        }
    };

    for capture in regex.find_iter(keycodes).map(|m| m.as_str()) {
        if let Some(key) = Key::from_keycode_string(capture) {
            keys.push_back(key);
        }
    }

    keys
}

/// Converts a crossterm press event. Releases and repeats are dropped, as
/// are keys without a binding notation.
pub fn to_key(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let mut modifiers: Vec<_> = event
        .modifiers
        .iter_names()
        .filter_map(|(name, _)| to_modifier(name))
        .collect();

    let code = match event.code {
        event::KeyCode::BackTab => {
            modifiers.push(KeyModifier::Shift);
            KeyCode::Tab
        }
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Char(c) => {
            if c.is_ascii_uppercase() {
                modifiers.push(KeyModifier::Shift);
            }
            KeyCode::from_char(c)
        }
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Up => KeyCode::Up,
        _ => return None,
    };

    modifiers.sort();
    modifiers.dedup();

    Some(Key::new(code, modifiers))
}

fn to_modifier(modifier: &str) -> Option<KeyModifier> {
    match modifier {
        "ALT" => Some(KeyModifier::Alt),
        "CONTROL" => Some(KeyModifier::Ctrl),
        "HYPER" => Some(KeyModifier::Command),
        "META" => Some(KeyModifier::Alt),
        "SHIFT" => Some(KeyModifier::Shift),
        "SUPER" => Some(KeyModifier::Command),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crossterm::event::{KeyEventState, KeyModifiers};

    use super::*;

    #[test]
    fn from_keycode_string_empty() {
        let expected: VecDeque<Key> = VecDeque::new();
        assert_eq!(expected, from_keycode_string(""));
    }

    #[test]
    fn from_keycode_string_multiple() {
        let expected: VecDeque<Key> = VecDeque::from([
            Key::new(KeyCode::from_char('5'), vec![]),
            Key::new(KeyCode::from_char('j'), vec![]),
            Key::new(KeyCode::from_char('l'), vec![KeyModifier::Ctrl]),
            Key::new(KeyCode::from_char('g'), vec![KeyModifier::Shift]),
            Key::new(KeyCode::Enter, vec![]),
        ]);

        assert_eq!(expected, from_keycode_string("5j<C-l>G<cr>"));
    }

    #[test]
    fn from_keycode_string_invalid() {
        assert!(from_keycode_string("<Invalid>").is_empty());
    }

    #[test]
    fn to_key_maps_back_tab_to_shifted_tab() {
        let event = KeyEvent {
            code: event::KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };

        assert_eq!(
            Some(Key::new(KeyCode::Tab, vec![KeyModifier::Shift])),
            to_key(&event)
        );
    }

    #[test]
    fn to_key_marks_uppercase_chars_shifted() {
        let event = KeyEvent {
            code: event::KeyCode::Char('G'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };

        assert_eq!(
            Some(Key::new(KeyCode::Char('g'), vec![KeyModifier::Shift])),
            to_key(&event)
        );
    }

    #[test]
    fn to_key_skips_release_events() {
        let event = KeyEvent {
            code: event::KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(None, to_key(&event));
    }
}
