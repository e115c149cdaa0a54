//! Calculation tape
//!
//! A bounded record of completed calculations, newest at the back.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

use crate::core::Operation;
use crate::entry::format_number;
use crate::error::AppResult;

/// One completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// First operand
    pub first: f64,
    /// Operator applied
    pub operation: Operation,
    /// Second operand, implied or typed
    pub second: f64,
    /// Computed result
    pub result: f64,
}

impl TapeEntry {
    /// Creates a new tape entry
    #[must_use]
    pub fn new(first: f64, operation: Operation, second: f64, result: f64) -> Self {
        Self {
            first,
            operation,
            second,
            result,
        }
    }

    /// Returns a formatted display string
    #[must_use]
    pub fn display(&self) -> String {
        self.display_with_precision(10)
    }

    /// Returns a display string using `max_fraction_digits` per number
    #[must_use]
    pub fn display_with_precision(&self, max_fraction_digits: usize) -> String {
        format!(
            "{} {} {} = {}",
            format_number(self.first, max_fraction_digits),
            self.operation,
            format_number(self.second, max_fraction_digits),
            format_number(self.result, max_fraction_digits),
        )
    }
}

/// Bounded calculation tape
#[derive(Debug, Clone)]
pub struct Tape {
    entries: VecDeque<TapeEntry>,
    capacity: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Default maximum tape length
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a tape with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a tape holding at most `capacity` entries (minimum one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, dropping the oldest when full
    pub fn push(&mut self, entry: TapeEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the tape is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clears all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter()
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter_rev(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&TapeEntry> {
        self.entries.back()
    }

    /// Serializes the tape to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Writes the tape to `path` as JSON
    ///
    /// Infinite and NaN results are written as `null`.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Deserializes a tape from JSON, keeping the newest `capacity` entries
    pub fn from_json(json: &str, capacity: usize) -> Result<Self, serde_json::Error> {
        let entries: Vec<TapeEntry> = serde_json::from_str(json)?;
        let mut tape = Self::with_capacity(capacity);
        for entry in entries {
            tape.push(entry);
        }
        Ok(tape)
    }
}
