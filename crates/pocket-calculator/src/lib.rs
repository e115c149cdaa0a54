//! Pocket Calculator - a four-function calculator engine with a terminal UI
//!
//! The [`MathEngine`](core::MathEngine) holds at most two operands and one
//! pending operation. It reports every change to an
//! [`EngineObserver`](core::EngineObserver), which is how the display and
//! the tape stay in sync without the engine knowing about either.
//!
//! # Engine rules
//!
//! - A third operand is rejected until an operator or `=` consumes one
//! - `=` with only one operand squares it (`7 × =` is `49`)
//! - Every evaluation resets the engine before the result is reported
//! - Division by zero follows IEEE-754 (`∞`, `-∞` or `NaN`), it never fails
//!
//! # Example
//!
//! ```rust
//! use pocket_calculator::prelude::*;
//!
//! let mut engine = MathEngine::new();
//! engine.push_operand(6.0).unwrap();
//! engine.push_operator(Operation::Multiply);
//! engine.push_operand(7.0).unwrap();
//! assert_eq!(engine.evaluate(), Some(42.0));
//! assert_eq!(engine.state(), EngineState::Empty);
//!
//! // Key-level session with a display and a tape
//! let mut session = CalculatorSession::new();
//! session.press_all([Key::Digit(1), Key::Digit(2), Key::Operator(Operation::Add)]);
//! session.press_all([Key::Digit(3), Key::Equals]);
//! assert_eq!(session.display(), "15");
//! assert_eq!(session.tape().last().unwrap().display(), "12 + 3 = 15");
//! ```

// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod entry;
pub mod error;
pub mod session;
pub mod tape;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ChainPolicy, EngineConfig};
    pub use crate::core::{
        EngineError, EngineEvent, EngineObserver, EngineResult, EngineState, EventLog, MathEngine,
        Operation,
    };
    pub use crate::entry::{format_number, EntryBuffer};
    pub use crate::error::{AppError, AppResult};
    pub use crate::session::{CalculatorSession, Key};
    pub use crate::tape::{Tape, TapeEntry};
}
