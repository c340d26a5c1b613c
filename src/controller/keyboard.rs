use log::debug;

use crate::keys::{InputFocus, KeyAction};

use super::player::Controller;

impl Controller {
    /// Apply a shortcut. Returns false when the key was not consumed:
    /// the player is closed or a text input has focus.
    pub fn handle_key(&mut self, action: KeyAction, focus: InputFocus) -> bool {
        if !self.state().visible || focus == InputFocus::TextInput {
            return false;
        }
        debug!("key {action:?}");
        match action {
            KeyAction::TogglePlay => self.toggle_play_pause(),
            KeyAction::Previous => self.previous(),
            KeyAction::Next => self.next(),
            KeyAction::VolumeUp => self.volume_up(),
            KeyAction::VolumeDown => self.volume_down(),
            KeyAction::Mute => self.toggle_mute(),
            KeyAction::Fullscreen => self.toggle_fullscreen(),
            KeyAction::Shuffle => self.toggle_shuffle(),
            KeyAction::Repeat => self.cycle_repeat(),
            KeyAction::Escape => {
                if self.state().fullscreen {
                    self.toggle_fullscreen();
                } else {
                    self.close();
                }
            }
        }
        true
    }
}
