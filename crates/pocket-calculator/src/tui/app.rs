//! TUI application state

use ratatui::layout::Rect;
use tracing::info;

use super::input::KeyAction;
use super::keypad::Keypad;
use crate::config::CalculatorConfig;
use crate::core::EngineState;
use crate::entry::format_number;
use crate::session::{CalculatorSession, Key};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    session: CalculatorSession,
    keypad: Keypad,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a calculator app with custom settings
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            session: CalculatorSession::with_config(config),
            keypad: Keypad::new(),
            should_quit: false,
        }
    }

    /// Returns the calculator session
    #[must_use]
    pub fn session(&self) -> &CalculatorSession {
        &self.session
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Sends one calculator key
    pub fn press(&mut self, key: Key) {
        self.session.press(key);
        self.keypad
            .highlight_operation(self.session.highlighted_operation());
    }

    /// Applies a keyboard action
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(key) => self.press(key),
            KeyAction::ClearTape => self.session.clear_tape(),
            KeyAction::Quit => {
                info!("quit requested");
                self.quit();
            }
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click at (x, y) given where the keypad was drawn
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) {
        if let Some(key) = self.keypad.key_at(keypad_area, x, y) {
            self.press(key);
        }
    }

    /// Describes the pending calculation, e.g. `12 ×`
    #[must_use]
    pub fn pending_line(&self) -> String {
        let engine = self.session.engine();
        let precision = self.session.config().max_fraction_digits;
        let number = |v: f64| format_number(v, precision);
        match engine.state() {
            EngineState::Empty => String::new(),
            EngineState::OperatorOnly => engine
                .pending_operation()
                .map(|op| op.symbol().to_string())
                .unwrap_or_default(),
            EngineState::Operand1Set => engine.first_operand().map(number).unwrap_or_default(),
            EngineState::OperatorSet | EngineState::Operand2Set => {
                let mut parts = Vec::new();
                if let Some(first) = engine.first_operand() {
                    parts.push(number(first));
                }
                if let Some(op) = engine.pending_operation() {
                    parts.push(op.symbol().to_string());
                }
                if let Some(second) = engine.second_operand() {
                    parts.push(number(second));
                }
                parts.join(" ")
            }
        }
    }

    /// Status messages for the status panel
    #[must_use]
    pub fn status(&self) -> Vec<String> {
        let mut status = Vec::new();
        match self.session.last_error() {
            Some(err) => status.push(format!("✗ {err}")),
            None if self.session.display_value().is_nan() => {
                status.push("✗ Result is not a number".into());
            }
            None if self.session.display_value().is_infinite() => {
                status.push("✗ Result is infinite".into());
            }
            None => status.push("✓ Ready".into()),
        }
        status.push(format!(
            "Chain: {:?}",
            self.session.config().engine.chain_policy
        ));
        status
    }
}
