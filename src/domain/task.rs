//! Task domain model
//!
//! A task is a titled unit of work with a fixed priority and a
//! completion flag. Completion is the only thing that changes after
//! creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Invalid priority: expected high, medium or low, got '{0}'")]
    InvalidPriority(String),
}

/// Priority of a task
///
/// Declaration order is display order: `High` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities in rank order
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank (lower = shown earlier)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Next priority in selector order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    /// Previous priority in selector order, wrapping around
    pub fn prev(self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            _ => Err(TaskError::InvalidPriority(s.to_string())),
        }
    }
}

/// A task in the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Human-readable title, stored as entered
    pub title: String,

    /// Priority chosen at creation
    pub priority: Priority,

    /// Whether the task has been marked complete
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new incomplete task, rejecting blank titles
    pub fn new(id: TaskId, title: impl Into<String>, priority: Priority) -> Result<Self, TaskError> {
        let title = title.into();
        validate_title(&title)?;

        Ok(Self {
            id,
            title,
            priority,
            completed: false,
            created_at: Utc::now(),
        })
    }

    /// Returns a copy of this task with the completion flag inverted
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Returns true if this task gets the high-priority treatment
    pub fn is_high_priority(&self) -> bool {
        self.priority == Priority::High
    }

    /// Label for the completion toggle control
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Undo"
        } else {
            "Complete"
        }
    }
}

/// Checks that a title has something besides whitespace
pub fn validate_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        Err(TaskError::EmptyTitle)
    } else {
        Ok(())
    }
}
