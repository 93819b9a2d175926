//! Task identifiers
//!
//! IDs are plain sequence numbers handed out by [`TaskIdSequence`].
//! The sequence only moves forward, so an ID is never reused within a
//! session, not even after the task holding it is deleted.
//!
//! ID Format: decimal number (e.g., `7`), optionally written `#7` on input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID: expected a positive number like '3' or '#3', got '{0}'")]
    InvalidTaskId(String),
}

/// Task ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Returns the numeric value of the ID
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        match digits.parse::<u64>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(IdError::InvalidTaskId(s.to_string())),
        }
    }
}

/// Monotonic source of fresh task IDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIdSequence {
    next: u64,
}

impl TaskIdSequence {
    /// Creates a sequence whose first ID is `1`
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hands out the next ID and advances the sequence
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        id
    }

    /// Returns the ID the next call to [`next_id`](Self::next_id) will produce
    pub fn peek(&self) -> TaskId {
        TaskId(self.next)
    }
}

impl Default for TaskIdSequence {
    fn default() -> Self {
        Self::new()
    }
}
