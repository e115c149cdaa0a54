//! Engine notifications
//!
//! The engine reports every state change through [`EngineObserver`]. Callbacks
//! fire synchronously, inside the call that caused them.

use serde::{Deserialize, Serialize};

use super::Operation;

/// Receives state-change notifications from a [`MathEngine`](super::MathEngine)
///
/// Every method has an empty default body, so an observer only implements the
/// notifications it cares about.
pub trait EngineObserver {
    /// The first operand slot was filled
    fn first_operand_changed(&mut self, _value: f64) {}

    /// The second operand slot was filled
    fn second_operand_changed(&mut self, _value: f64) {}

    /// A new operator became pending
    fn operation_changed(&mut self, _operation: Operation) {}

    /// A calculation completed; the engine is back to its empty state
    fn result_computed(&mut self, _result: f64) {}
}

/// One engine notification as data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum EngineEvent {
    /// First operand set
    FirstOperand(f64),
    /// Second operand set
    SecondOperand(f64),
    /// Pending operator changed
    Operation(Operation),
    /// Result computed
    Result(f64),
}

/// Observer that records every notification in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<EngineEvent>,
}

impl EventLog {
    /// Creates an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first
    #[must_use]
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Returns the number of recorded events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the most recent computed result, if any
    #[must_use]
    pub fn last_result(&self) -> Option<f64> {
        self.events.iter().rev().find_map(|event| match event {
            EngineEvent::Result(value) => Some(*value),
            _ => None,
        })
    }

    /// Drains the recorded events
    pub fn take(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EngineObserver for EventLog {
    fn first_operand_changed(&mut self, value: f64) {
        self.events.push(EngineEvent::FirstOperand(value));
    }

    fn second_operand_changed(&mut self, value: f64) {
        self.events.push(EngineEvent::SecondOperand(value));
    }

    fn operation_changed(&mut self, operation: Operation) {
        self.events.push(EngineEvent::Operation(operation));
    }

    fn result_computed(&mut self, result: f64) {
        self.events.push(EngineEvent::Result(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ResultsOnly {
        results: Vec<f64>,
    }

    impl EngineObserver for ResultsOnly {
        fn result_computed(&mut self, result: f64) {
            self.results.push(result);
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        let mut observer = ResultsOnly::default();
        observer.first_operand_changed(1.0);
        observer.second_operand_changed(2.0);
        observer.operation_changed(Operation::Add);
        observer.result_computed(3.0);
        assert_eq!(observer.results, vec![3.0]);
    }

    #[test]
    fn test_event_log_records_in_order() {
        let mut log = EventLog::new();
        log.first_operand_changed(5.0);
        log.operation_changed(Operation::Add);
        log.second_operand_changed(3.0);
        log.result_computed(8.0);
        assert_eq!(
            log.events(),
            &[
                EngineEvent::FirstOperand(5.0),
                EngineEvent::Operation(Operation::Add),
                EngineEvent::SecondOperand(3.0),
                EngineEvent::Result(8.0),
            ]
        );
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_event_log_last_result() {
        let mut log = EventLog::new();
        assert_eq!(log.last_result(), None);
        log.result_computed(1.0);
        log.first_operand_changed(9.0);
        log.result_computed(2.0);
        log.first_operand_changed(7.0);
        assert_eq!(log.last_result(), Some(2.0));
    }

    #[test]
    fn test_event_log_take_drains() {
        let mut log = EventLog::new();
        log.result_computed(4.0);
        let drained = log.take();
        assert_eq!(drained, vec![EngineEvent::Result(4.0)]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let json = serde_json::to_string(&EngineEvent::Operation(Operation::Divide)).unwrap();
        assert_eq!(json, r#"{"event":"operation","value":"divide"}"#);
    }
}
