//! Calculator configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppResult;

/// What a chaining operator key does after it forces an evaluation
///
/// Pressing `5 + 3 -` computes `5 + 3` immediately. The operator that
/// triggered the computation is either dropped or kept pending for the next
/// calculation with the result as its first operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainPolicy {
    /// Drop the triggering operator; the engine ends up empty
    #[default]
    Discard,
    /// Seed the next calculation with the result and the triggering operator
    Carry,
}

impl ChainPolicy {
    /// Returns true if the triggering operator survives the evaluation
    #[must_use]
    pub const fn carries(self) -> bool {
        matches!(self, Self::Carry)
    }
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Behaviour of a chaining operator key
    pub chain_policy: ChainPolicy,
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set chain policy
    #[must_use]
    pub const fn with_chain_policy(mut self, chain_policy: ChainPolicy) -> Self {
        self.chain_policy = chain_policy;
        self
    }
}

/// Full calculator configuration
///
/// Missing fields in a config file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Engine settings
    pub engine: EngineConfig,
    /// Maximum fraction digits shown on the display
    pub max_fraction_digits: usize,
    /// Number of completed calculations kept on the tape
    pub tape_capacity: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            max_fraction_digits: Self::DEFAULT_FRACTION_DIGITS,
            tape_capacity: Self::DEFAULT_TAPE_CAPACITY,
        }
    }
}

impl CalculatorConfig {
    /// Default display precision
    pub const DEFAULT_FRACTION_DIGITS: usize = 10;

    /// Upper bound for display precision
    pub const MAX_FRACTION_DIGITS: usize = 15;

    /// Default tape length
    pub const DEFAULT_TAPE_CAPACITY: usize = 100;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON config file
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        let (digits, capacity) = (config.max_fraction_digits, config.tape_capacity);
        Ok(config
            .with_max_fraction_digits(digits)
            .with_tape_capacity(capacity))
    }

    /// Set chain policy
    #[must_use]
    pub const fn with_chain_policy(mut self, chain_policy: ChainPolicy) -> Self {
        self.engine.chain_policy = chain_policy;
        self
    }

    /// Set display precision, clamped to [`Self::MAX_FRACTION_DIGITS`]
    #[must_use]
    pub fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits.min(Self::MAX_FRACTION_DIGITS);
        self
    }

    /// Set tape capacity (at least one entry)
    #[must_use]
    pub fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape_capacity = capacity.max(1);
        self
    }
}
