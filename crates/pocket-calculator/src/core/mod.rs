//! Calculator core: operators, the engine state machine and its notifications

mod engine;
mod observer;
mod operations;

pub use engine::{EngineState, MathEngine};
pub use observer::{EngineEvent, EngineObserver, EventLog};
pub use operations::Operation;

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Both operand slots are occupied
    #[error("Too many operands: push an operator or evaluate first")]
    TooManyOperands,
}
