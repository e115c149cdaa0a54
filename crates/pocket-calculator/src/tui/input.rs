//! Keyboard input handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Operation;
use crate::session::Key;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send a calculator key
    Press(Key),
    /// Empty the tape
    ClearTape,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::ClearTape,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => Self::map_char(c),
            KeyCode::Enter => KeyAction::Press(Key::Equals),
            KeyCode::Backspace => KeyAction::Press(Key::Backspace),
            KeyCode::Delete | KeyCode::Esc => KeyAction::Press(Key::Clear),
            _ => KeyAction::None,
        }
    }

    fn map_char(c: char) -> KeyAction {
        if let Some(d) = c.to_digit(10) {
            return KeyAction::Press(Key::Digit(d as u8));
        }
        if let Some(op) = Operation::from_char(c) {
            return KeyAction::Press(Key::Operator(op));
        }
        match c {
            '.' | ',' => KeyAction::Press(Key::Decimal),
            '=' => KeyAction::Press(Key::Equals),
            'n' | '~' => KeyAction::Press(Key::ToggleSign),
            'c' | 'C' => KeyAction::Press(Key::Clear),
            'q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}
