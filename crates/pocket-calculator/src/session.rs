//! Keypad session: entry buffer, engine and tape wired together
//!
//! A [`CalculatorSession`] owns one [`MathEngine`] and translates key presses
//! into engine calls the way a pocket calculator does: operator and `=` keys
//! first hand the displayed number to the engine as an operand.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::core::{EngineError, EngineObserver, MathEngine, Operation};
use crate::entry::{format_number, EntryBuffer};
use crate::tape::{Tape, TapeEntry};

/// A calculator key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Remove last typed character
    Backspace,
    /// Negate the displayed number
    ToggleSign,
    /// Operator key
    Operator(Operation),
    /// Evaluate
    Equals,
    /// Clear entry and pending calculation
    Clear,
}

impl Key {
    /// Returns the keycap label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".into(),
            Self::Backspace => "⌫".into(),
            Self::ToggleSign => "±".into(),
            Self::Operator(op) => op.symbol().into(),
            Self::Equals => "=".into(),
            Self::Clear => "C".into(),
        }
    }
}

/// What the display is currently showing
#[derive(Debug, Clone, Copy, PartialEq)]
enum Showing {
    /// The number being typed
    Entry,
    /// A value already handed to the engine
    Operand(f64),
    /// A computed result not yet used as an operand
    Result(f64),
}

/// Collects engine notifications between session calls
#[derive(Debug, Default)]
struct SessionObserver {
    first: Option<f64>,
    operation: Option<Operation>,
    second: Option<f64>,
    highlighted: Option<Operation>,
    completed: Vec<TapeEntry>,
}

impl SessionObserver {
    fn forget_pending(&mut self) {
        self.first = None;
        self.operation = None;
        self.second = None;
        self.highlighted = None;
    }
}

impl EngineObserver for SessionObserver {
    fn first_operand_changed(&mut self, value: f64) {
        self.first = Some(value);
    }

    fn second_operand_changed(&mut self, value: f64) {
        self.second = Some(value);
    }

    fn operation_changed(&mut self, operation: Operation) {
        self.operation = Some(operation);
        self.highlighted = Some(operation);
    }

    fn result_computed(&mut self, result: f64) {
        if let (Some(first), Some(operation)) = (self.first, self.operation) {
            let second = self.second.unwrap_or(first);
            self.completed
                .push(TapeEntry::new(first, operation, second, result));
        }
        self.forget_pending();
    }
}

/// One calculator: display, keypad logic and tape
#[derive(Debug)]
pub struct CalculatorSession {
    engine: MathEngine,
    entry: EntryBuffer,
    showing: Showing,
    observer: Rc<RefCell<SessionObserver>>,
    highlighted: Option<Operation>,
    tape: Tape,
    last_error: Option<EngineError>,
    config: CalculatorConfig,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    /// Creates a session with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a session with custom settings
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let observer = Rc::new(RefCell::new(SessionObserver::default()));
        let mut engine = MathEngine::with_config(config.engine);
        engine.set_observer(&observer);
        Self {
            engine,
            entry: EntryBuffer::new(),
            showing: Showing::Entry,
            observer,
            highlighted: None,
            tape: Tape::with_capacity(config.tape_capacity),
            last_error: None,
            config,
        }
    }

    /// Returns the session settings
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &MathEngine {
        &self.engine
    }

    /// Returns the completed calculations
    #[must_use]
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the operator whose key should be highlighted
    #[must_use]
    pub fn highlighted_operation(&self) -> Option<Operation> {
        self.highlighted
    }

    /// Returns the last rejected input, cleared by the next accepted key
    #[must_use]
    pub fn last_error(&self) -> Option<EngineError> {
        self.last_error
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> String {
        match self.showing {
            Showing::Entry => self.entry.display_text(),
            Showing::Operand(value) | Showing::Result(value) => {
                format_number(value, self.config.max_fraction_digits)
            }
        }
    }

    /// Returns the number the display stands for
    #[must_use]
    pub fn display_value(&self) -> f64 {
        match self.showing {
            Showing::Entry => self.entry.value(),
            Showing::Operand(value) | Showing::Result(value) => value,
        }
    }

    /// Returns true if the display shows a computed result
    #[must_use]
    pub fn is_showing_result(&self) -> bool {
        matches!(self.showing, Showing::Result(_))
    }

    /// Handles one key press
    pub fn press(&mut self, key: Key) {
        debug!(?key, "key pressed");
        match key {
            Key::Digit(d) => self.digit(d),
            Key::Decimal => self.decimal(),
            Key::Backspace => self.backspace(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Operator(op) => self.operator(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
        }
    }

    /// Handles a sequence of key presses
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Types a digit
    pub fn digit(&mut self, digit: u8) {
        self.start_entry();
        self.entry.push_digit(digit);
    }

    /// Types a decimal point
    pub fn decimal(&mut self) {
        self.start_entry();
        self.entry.push_decimal();
    }

    /// Deletes the last typed character; results and operands are not editable
    pub fn backspace(&mut self) {
        if self.showing == Showing::Entry {
            self.entry.backspace();
        }
    }

    /// Negates the displayed number
    pub fn toggle_sign(&mut self) {
        match self.showing {
            Showing::Entry => self.entry.toggle_sign(),
            Showing::Operand(value) | Showing::Result(value) => {
                self.entry.load(value, self.config.max_fraction_digits);
                self.entry.toggle_sign();
                self.showing = Showing::Entry;
            }
        }
    }

    /// Hands the displayed number to the engine, then selects `operation`
    pub fn operator(&mut self, operation: Operation) {
        self.push_display();
        self.engine.push_operator(operation);
        self.sync();
    }

    /// Hands the displayed number to the engine, then evaluates
    pub fn equals(&mut self) {
        self.push_display();
        self.engine.evaluate();
        self.sync();
    }

    /// Clears the entry and any pending calculation; the tape is kept
    pub fn clear(&mut self) {
        self.engine.clear();
        self.observer.borrow_mut().forget_pending();
        self.entry.reset();
        self.showing = Showing::Entry;
        self.highlighted = None;
        self.last_error = None;
    }

    /// Empties the tape
    pub fn clear_tape(&mut self) {
        self.tape.clear();
    }

    fn start_entry(&mut self) {
        if self.showing != Showing::Entry {
            self.entry.reset();
            self.showing = Showing::Entry;
        }
    }

    fn push_display(&mut self) {
        let value = match self.showing {
            Showing::Entry => self.entry.value(),
            Showing::Result(value) => value,
            Showing::Operand(_) => return,
        };
        match self.engine.push_operand(value) {
            Ok(()) => {
                self.entry.reset();
                self.showing = Showing::Operand(value);
                self.last_error = None;
            }
            Err(err) => {
                warn!(%err, operand = value, "operand rejected");
                self.last_error = Some(err);
            }
        }
    }

    fn sync(&mut self) {
        let mut observer = self.observer.borrow_mut();
        self.highlighted = observer.highlighted;
        for entry in observer.completed.drain(..) {
            debug!(entry = %entry.display(), "calculation recorded");
            let result = entry.result;
            self.tape.push(entry);
            self.showing = if self.engine.first_operand().is_some() {
                Showing::Operand(result)
            } else {
                Showing::Result(result)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainPolicy;
    use crate::core::EngineState;

    fn keys(input: &str) -> Vec<Key> {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '.' => Key::Decimal,
                '<' => Key::Backspace,
                '~' => Key::ToggleSign,
                '=' => Key::Equals,
                'C' => Key::Clear,
                d if d.is_ascii_digit() => Key::Digit(d.to_digit(10).unwrap() as u8),
                op => Key::Operator(Operation::from_char(op).unwrap()),
            })
            .collect()
    }

    fn run(input: &str) -> CalculatorSession {
        let mut session = CalculatorSession::new();
        session.press_all(keys(input));
        session
    }

    // ===== Basic flow =====

    #[test]
    fn test_initial_display() {
        let session = CalculatorSession::new();
        assert_eq!(session.display(), "0");
        assert!(session.tape().is_empty());
        assert_eq!(session.highlighted_operation(), None);
    }

    #[test]
    fn test_simple_addition() {
        let session = run("5 + 3 =");
        assert_eq!(session.display(), "8");
        assert!(session.is_showing_result());
        assert_eq!(session.engine().state(), EngineState::Empty);
        assert_eq!(session.tape().last().unwrap().display(), "5 + 3 = 8");
    }

    #[test]
    fn test_multi_digit_and_decimal() {
        let session = run("12.5 * 4 =");
        assert_eq!(session.display(), "50");
    }

    #[test]
    fn test_operator_shows_pushed_operand() {
        let session = run("42 +");
        assert_eq!(session.display(), "42");
        assert_eq!(session.highlighted_operation(), Some(Operation::Add));
        assert_eq!(session.engine().first_operand(), Some(42.0));
    }

    #[test]
    fn test_implied_second_operand() {
        let session = run("7 * =");
        assert_eq!(session.display(), "49");
        assert_eq!(session.tape().last().unwrap().display(), "7 × 7 = 49");
    }

    #[test]
    fn test_operator_replaced() {
        let session = run("9 + - 4 =");
        assert_eq!(session.display(), "5");
    }

    #[test]
    fn test_divide_by_zero() {
        let session = run("10 / 0 =");
        assert_eq!(session.display(), "∞");
        assert_eq!(session.display_value(), f64::INFINITY);
    }

    #[test]
    fn test_zero_divided_by_zero_shows_error() {
        let session = run("0 / 0 =");
        assert_eq!(session.display(), "Error");
    }

    // ===== Results feed the next calculation =====

    #[test]
    fn test_result_used_as_first_operand() {
        let session = run("5 + 3 = * 2 =");
        assert_eq!(session.display(), "16");
        assert_eq!(session.tape().len(), 2);
    }

    #[test]
    fn test_typing_after_result_starts_new_number() {
        let session = run("5 + 3 = 4");
        assert_eq!(session.display(), "4");
        assert_eq!(session.engine().state(), EngineState::Empty);
    }

    // ===== Chained operators =====

    #[test]
    fn test_chained_operator_evaluates() {
        let session = run("5 + 3 -");
        assert_eq!(session.display(), "8");
        assert_eq!(session.tape().last().unwrap().result, 8.0);
        assert_eq!(session.highlighted_operation(), None);
        assert_eq!(session.engine().pending_operation(), None);
    }

    #[test]
    fn test_chained_operator_carried() {
        let config = CalculatorConfig::new().with_chain_policy(ChainPolicy::Carry);
        let mut session = CalculatorSession::with_config(config);
        session.press_all(keys("5 + 3 - 2 ="));
        assert_eq!(session.display(), "6");
        assert_eq!(session.tape().len(), 2);
    }

    #[test]
    fn test_carried_operator_can_be_changed() {
        let config = CalculatorConfig::new().with_chain_policy(ChainPolicy::Carry);
        let mut session = CalculatorSession::with_config(config);
        session.press_all(keys("5 + 3 - *"));
        assert_eq!(session.highlighted_operation(), Some(Operation::Multiply));
        assert_eq!(session.engine().first_operand(), Some(8.0));
        session.press_all(keys("2 ="));
        assert_eq!(session.display(), "16");
    }

    #[test]
    fn test_carried_nan_is_not_pushed_again() {
        let config = CalculatorConfig::new().with_chain_policy(ChainPolicy::Carry);
        let mut session = CalculatorSession::with_config(config);
        session.press_all(keys("0 / 0 +"));
        assert_eq!(session.display(), "Error");
        assert_eq!(session.tape().len(), 1);

        session.press_all(keys("*"));
        assert_eq!(session.tape().len(), 1);
        assert_eq!(session.engine().pending_operation(), Some(Operation::Multiply));
        assert_eq!(session.engine().second_operand(), None);
        assert_eq!(session.highlighted_operation(), Some(Operation::Multiply));
    }

    // ===== Editing =====

    #[test]
    fn test_backspace_and_sign() {
        let session = run("123 < ~");
        assert_eq!(session.display(), "-12");
    }

    #[test]
    fn test_toggle_sign_on_result() {
        let session = run("2 + 2 = ~ + 1 =");
        assert_eq!(session.display(), "-3");
    }

    #[test]
    fn test_toggle_sign_negates_shown_result() {
        let mut session = run(".1 + .2 =");
        assert_eq!(session.display(), "0.3");
        session.press(Key::ToggleSign);
        assert_eq!(session.display(), "-0.3");
        assert_eq!(session.display_value(), -0.3);
    }

    #[test]
    fn test_toggle_sign_on_large_result() {
        let mut session = run("100000000 * 1000000000000 =");
        assert_eq!(session.display(), "1e20");
        session.press(Key::ToggleSign);
        assert_eq!(session.display(), "-1e20");
        session.press(Key::Digit(7));
        assert_eq!(session.display(), "-1e20");
    }

    #[test]
    fn test_backspace_ignored_on_result() {
        let session = run("2 + 2 = <");
        assert_eq!(session.display(), "4");
    }

    #[test]
    fn test_decimal_display() {
        let session = run("3.");
        assert_eq!(session.display(), "3.");
    }

    // ===== Errors & clear =====

    #[test]
    fn test_too_many_operands_reported() {
        let session = run("1 = 2 = 3 =");
        assert_eq!(session.last_error(), Some(EngineError::TooManyOperands));
        assert_eq!(session.engine().first_operand(), Some(1.0));
        assert_eq!(session.engine().second_operand(), Some(2.0));
        assert_eq!(session.display(), "3");
    }

    #[test]
    fn test_clear_recovers() {
        let mut session = run("1 = 2 = 3 =");
        session.press(Key::Clear);
        assert_eq!(session.last_error(), None);
        assert_eq!(session.engine().state(), EngineState::Empty);
        session.press_all(keys("4 + 4 ="));
        assert_eq!(session.display(), "8");
    }

    #[test]
    fn test_clear_keeps_tape() {
        let mut session = run("1 + 1 = 5 +");
        session.clear();
        assert_eq!(session.display(), "0");
        assert_eq!(session.highlighted_operation(), None);
        assert_eq!(session.tape().len(), 1);
        session.clear_tape();
        assert!(session.tape().is_empty());
    }

    #[test]
    fn test_equals_without_operator_is_harmless() {
        let session = run("5 =");
        assert_eq!(session.display(), "5");
        assert!(session.tape().is_empty());
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn test_tape_capacity_from_config() {
        let config = CalculatorConfig::new().with_tape_capacity(2);
        let mut session = CalculatorSession::with_config(config);
        session.press_all(keys("1+1= 2+2= 3+3="));
        assert_eq!(session.tape().len(), 2);
        assert_eq!(session.tape().iter().next().unwrap().result, 4.0);
    }

    #[test]
    fn test_precision_from_config() {
        let config = CalculatorConfig::new().with_max_fraction_digits(3);
        let mut session = CalculatorSession::with_config(config);
        session.press_all(keys("1 / 3 ="));
        assert_eq!(session.display(), "0.333");
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(Key::Digit(7).label(), "7");
        assert_eq!(Key::Operator(Operation::Divide).label(), "÷");
        assert_eq!(Key::ToggleSign.label(), "±");
        assert_eq!(Key::Clear.label(), "C");
    }
}
