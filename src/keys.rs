//! Keyboard shortcuts for the open player.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlay,
    Previous,
    Next,
    VolumeUp,
    VolumeDown,
    Mute,
    Fullscreen,
    Shuffle,
    Repeat,
    /// Leave fullscreen, or close the player when not fullscreen.
    Escape,
}

/// Where keyboard focus sits on the hosting page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    None,
    /// A text field has focus; shortcuts must not fire.
    TextInput,
}

impl KeyAction {
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        let action = match key.code {
            KeyCode::Char(' ') => Self::TogglePlay,
            KeyCode::Left => Self::Previous,
            KeyCode::Right => Self::Next,
            KeyCode::Up => Self::VolumeUp,
            KeyCode::Down => Self::VolumeDown,
            KeyCode::Char('m' | 'M') => Self::Mute,
            KeyCode::Char('f' | 'F') => Self::Fullscreen,
            KeyCode::Char('s' | 'S') => Self::Shuffle,
            KeyCode::Char('r' | 'R') => Self::Repeat,
            KeyCode::Esc => Self::Escape,
            _ => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_transport_and_toggle_keys() {
        assert_eq!(
            KeyAction::from_key_event(&key(KeyCode::Char(' '))),
            Some(KeyAction::TogglePlay)
        );
        assert_eq!(
            KeyAction::from_key_event(&key(KeyCode::Left)),
            Some(KeyAction::Previous)
        );
        assert_eq!(
            KeyAction::from_key_event(&key(KeyCode::Right)),
            Some(KeyAction::Next)
        );
        assert_eq!(
            KeyAction::from_key_event(&key(KeyCode::Down)),
            Some(KeyAction::VolumeDown)
        );
        assert_eq!(
            KeyAction::from_key_event(&key(KeyCode::Char('R'))),
            Some(KeyAction::Repeat)
        );
        assert_eq!(
            KeyAction::from_key_event(&key(KeyCode::Esc)),
            Some(KeyAction::Escape)
        );
    }

    #[test]
    fn letters_are_case_insensitive() {
        for (lower, upper) in [('m', 'M'), ('f', 'F'), ('s', 'S')] {
            assert_eq!(
                KeyAction::from_key_event(&key(KeyCode::Char(lower))),
                KeyAction::from_key_event(&key(KeyCode::Char(upper)))
            );
        }
    }

    #[test]
    fn modified_and_unknown_keys_are_ignored() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(&ctrl_s), None);
        assert_eq!(KeyAction::from_key_event(&key(KeyCode::Char('x'))), None);
        assert_eq!(KeyAction::from_key_event(&key(KeyCode::Enter)), None);
    }
}
