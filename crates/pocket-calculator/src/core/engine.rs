//! The operand/operator state machine behind the keypad
//!
//! A [`MathEngine`] accumulates up to two operands and one pending operator,
//! computes a result on demand and then forgets everything. State changes are
//! reported to a weakly held [`EngineObserver`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use super::{EngineError, EngineObserver, EngineResult, Operation};
use crate::config::EngineConfig;

/// Coarse classification of the engine's three slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing entered
    Empty,
    /// An operator was chosen before any operand
    OperatorOnly,
    /// First operand entered, no operator yet
    Operand1Set,
    /// First operand and operator entered
    OperatorSet,
    /// Both operands entered
    Operand2Set,
}

/// Two-operand, single-pending-operator calculator engine
pub struct MathEngine {
    first: Option<f64>,
    second: Option<f64>,
    pending: Option<Operation>,
    config: EngineConfig,
    observer: Option<Weak<RefCell<dyn EngineObserver>>>,
}

impl std::fmt::Debug for MathEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MathEngine")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("pending", &self.pending)
            .field("config", &self.config)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl Default for MathEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MathEngine {
    /// Creates an empty engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an empty engine with custom settings
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            first: None,
            second: None,
            pending: None,
            config,
            observer: None,
        }
    }

    /// Registers the observer that receives notifications
    ///
    /// Only a weak reference is kept: once every `Rc` to the observer is
    /// dropped, notifications stop. Replaces any previous observer.
    pub fn set_observer<O: EngineObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) {
        let observer: Rc<RefCell<dyn EngineObserver>> = observer.clone();
        self.observer = Some(Rc::downgrade(&observer));
    }

    /// Stops sending notifications
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Returns the engine settings
    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Returns the first operand, if entered
    #[must_use]
    pub fn first_operand(&self) -> Option<f64> {
        self.first
    }

    /// Returns the second operand, if entered
    #[must_use]
    pub fn second_operand(&self) -> Option<f64> {
        self.second
    }

    /// Returns the pending operator, if any
    #[must_use]
    pub fn pending_operation(&self) -> Option<Operation> {
        self.pending
    }

    /// Classifies the current slots
    #[must_use]
    pub fn state(&self) -> EngineState {
        match (self.first, self.pending, self.second) {
            (_, _, Some(_)) => EngineState::Operand2Set,
            (None, None, None) => EngineState::Empty,
            (None, Some(_), None) => EngineState::OperatorOnly,
            (Some(_), None, None) => EngineState::Operand1Set,
            (Some(_), Some(_), None) => EngineState::OperatorSet,
        }
    }

    /// Fills the next free operand slot
    ///
    /// Fails with [`EngineError::TooManyOperands`] when both slots are taken;
    /// the engine is left untouched in that case.
    pub fn push_operand(&mut self, value: f64) -> EngineResult<()> {
        if self.first.is_none() {
            self.first = Some(value);
            debug!(operand = value, "first operand set");
            self.notify(|o| o.first_operand_changed(value));
        } else if self.second.is_none() {
            self.second = Some(value);
            debug!(operand = value, "second operand set");
            self.notify(|o| o.second_operand_changed(value));
        } else {
            return Err(EngineError::TooManyOperands);
        }
        Ok(())
    }

    /// Selects an operator, or evaluates a complete calculation
    ///
    /// Before the second operand exists, a new or different operator becomes
    /// pending. With both operands and an operator present, the pending
    /// calculation is evaluated immediately; what happens to `operation` then
    /// depends on the configured [`ChainPolicy`](crate::config::ChainPolicy).
    pub fn push_operator(&mut self, operation: Operation) {
        if self.pending != Some(operation) && self.second.is_none() {
            self.pending = Some(operation);
            debug!(%operation, "operator pending");
            self.notify(|o| o.operation_changed(operation));
        } else if self.first.is_some() && self.second.is_some() && self.pending.is_some() {
            debug!(%operation, "chained evaluation");
            let Some(result) = self.evaluate() else {
                return;
            };
            if self.config.chain_policy.carries() {
                self.first = Some(result);
                self.notify(|o| o.first_operand_changed(result));
                self.pending = Some(operation);
                self.notify(|o| o.operation_changed(operation));
            }
        } else {
            trace!(%operation, "operator ignored");
        }
    }

    /// Computes the pending calculation and resets the engine
    ///
    /// A missing second operand is replaced by the first one, so `x + =`
    /// yields `2x`. Without a first operand or an operator nothing happens
    /// and `None` is returned.
    pub fn evaluate(&mut self) -> Option<f64> {
        let (Some(first), Some(operation)) = (self.first, self.pending) else {
            warn!(
                first = ?self.first,
                operation = ?self.pending,
                "evaluate requested without an operand and an operator"
            );
            return None;
        };
        let second = self.second.unwrap_or(first);
        self.reset();

        let result = operation.apply(first, second);
        debug!(first, %operation, second, result, "calculation complete");
        self.notify(|o| o.result_computed(result));
        Some(result)
    }

    /// Forgets operands and operator without notifying
    pub fn clear(&mut self) {
        trace!("engine cleared");
        self.reset();
    }

    fn reset(&mut self) {
        self.first = None;
        self.second = None;
        self.pending = None;
    }

    fn notify(&self, f: impl FnOnce(&mut dyn EngineObserver)) {
        let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        match observer.try_borrow_mut() {
            Ok(mut observer) => f(&mut *observer),
            Err(_) => warn!("observer already borrowed, notification dropped"),
        };
    }
}
