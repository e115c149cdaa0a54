//! Number entry and display formatting
//!
//! [`EntryBuffer`] is the number being typed on the keypad. It is always a
//! valid decimal literal, so [`EntryBuffer::value`] never fails.

use tracing::debug;

/// The number currently being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBuffer {
    text: String,
    decimal_requested: bool,
    pristine: bool,
}

impl Default for EntryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryBuffer {
    /// Maximum number of digits accepted
    pub const MAX_DIGITS: usize = 16;

    /// Creates a buffer showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: "0".to_string(),
            decimal_requested: false,
            pristine: true,
        }
    }

    /// Returns the raw entry text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text to show, including a requested but not yet typed `.`
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.decimal_requested && !self.text.contains('.') {
            format!("{}.", self.text)
        } else {
            self.text.clone()
        }
    }

    /// Returns true if nothing was typed since the last reset
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    /// Returns the entered value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.text.parse().unwrap_or(0.0)
    }

    /// Returns the number of digits entered
    #[must_use]
    pub fn digit_count(&self) -> usize {
        self.text.chars().filter(char::is_ascii_digit).count()
    }

    /// Appends a digit (0-9); anything else is ignored
    pub fn push_digit(&mut self, digit: u8) {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            debug!(digit, "not a decimal digit");
            return;
        };
        if self.is_scientific() || self.digit_count() >= Self::MAX_DIGITS {
            debug!("entry full, digit ignored");
            return;
        }
        self.pristine = false;

        if self.decimal_requested && !self.text.contains('.') {
            self.text.push('.');
            self.text.push(c);
        } else if self.text == "0" {
            self.text = c.to_string();
        } else if self.text == "-0" {
            self.text = format!("-{c}");
        } else {
            self.text.push(c);
        }
    }

    /// Requests a decimal point before the next digit
    pub fn push_decimal(&mut self) {
        if self.text.contains('.') || self.is_scientific() {
            debug!("decimal pressed on a decimal number");
            return;
        }
        self.pristine = false;
        self.decimal_requested = true;
    }

    /// Removes the last typed character
    ///
    /// A loaded number in scientific notation is removed as a whole.
    pub fn backspace(&mut self) {
        if self.is_scientific() {
            self.reset();
            return;
        }
        if self.decimal_requested && !self.text.contains('.') {
            self.decimal_requested = false;
            return;
        }
        self.text.pop();
        if self.text.ends_with('.') {
            self.text.pop();
            self.decimal_requested = false;
        }
        if self.text.is_empty() || self.text == "-" {
            self.text = "0".to_string();
            self.decimal_requested = false;
        }
    }

    /// Negates the entry; zero stays unsigned
    pub fn toggle_sign(&mut self) {
        if let Some(rest) = self.text.strip_prefix('-') {
            self.text = rest.to_string();
        } else if self.value() != 0.0 {
            self.text.insert(0, '-');
        }
    }

    /// Replaces the entry with `value` as [`format_number`] shows it
    ///
    /// Non-finite values cannot be typed and reset the entry instead. Values
    /// shown in scientific notation can be negated or deleted but not
    /// extended with more digits.
    pub fn load(&mut self, value: f64, max_fraction_digits: usize) {
        self.reset();
        if !value.is_finite() {
            debug!(value, "non-finite value not loaded");
            return;
        }
        if value != 0.0 {
            self.text = format_number(value, max_fraction_digits);
            self.pristine = false;
        }
    }

    /// Returns to `0`
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn is_scientific(&self) -> bool {
        self.text.contains('e')
    }
}

/// Formats a value for the display
///
/// Whole numbers print without a fraction. Other values keep at most
/// `max_fraction_digits` fraction digits with trailing zeros trimmed; very
/// large or very small magnitudes switch to scientific notation.
#[must_use]
pub fn format_number(value: f64, max_fraction_digits: usize) -> String {
    if value.is_nan() {
        return "Error".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "∞" } else { "-∞" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    let smallest = 10f64.powi(-(max_fraction_digits as i32));
    if magnitude >= 1e15 || magnitude < smallest {
        let formatted = format!("{:.*e}", max_fraction_digits.min(9), value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
            None => formatted,
        };
    }

    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }

    let formatted = format!("{:.*}", max_fraction_digits, value);
    match trim_fraction(&formatted) {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
