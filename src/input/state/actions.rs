use crate::config::Action;
use crate::draw::{BLACK, BLUE, GREEN, RED};
use crate::input::{events::Key, mode::DrawMode};

use super::InputState;

/// Width change per increase/decrease keypress, in pixels.
const WIDTH_STEP: f64 = 1.0;

impl InputState {
    /// Processes a key press event.
    ///
    /// Modifier keys update the tracked modifier state. Any other key is looked
    /// up in the keybinding map together with the held modifiers.
    ///
    /// Returns `true` when the key was consumed by an action; the host should
    /// then suppress its own default handling (e.g. the browser's Ctrl+Z).
    pub fn on_key_press(&mut self, key: Key) -> bool {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return false;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return false;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return false;
            }
            _ => {}
        }

        let Some(key_str) = key.lookup_name() else {
            return false;
        };

        match self.find_action(&key_str) {
            Some(action) => {
                self.handle_action(action);
                true
            }
            None => false,
        }
    }

    /// Processes a key release event (modifier tracking only).
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Handles an action triggered by a keybinding.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Undo => {
                if !self.undo() {
                    log::debug!("Nothing to undo on page {:?}", self.active_page);
                }
            }
            Action::Redo => {
                if !self.redo() {
                    log::debug!("Nothing to redo on page {:?}", self.active_page);
                }
            }
            Action::SelectPen => self.set_mode(DrawMode::Pen),
            Action::SelectHighlighter => self.set_mode(DrawMode::Highlighter),
            Action::SelectPixelEraser => self.set_mode(DrawMode::PixelEraser),
            Action::SelectStrokeEraser => self.set_mode(DrawMode::StrokeEraser),
            Action::IncreaseWidth => self.adjust_width(WIDTH_STEP),
            Action::DecreaseWidth => self.adjust_width(-WIDTH_STEP),
            Action::SetColorRed => self.set_color(RED),
            Action::SetColorGreen => self.set_color(GREEN),
            Action::SetColorBlue => self.set_color(BLUE),
            Action::SetColorBlack => self.set_color(BLACK),
        }
    }
}
