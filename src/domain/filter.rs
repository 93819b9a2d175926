//! Filters and the display projection
//!
//! [`project`] is the only place the task list is seen in filtered and
//! sorted form. It holds no state and may be called as often as needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::task::{Priority, Task};

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Invalid priority filter: expected all, high, medium or low, got '{0}'")]
    InvalidPriorityFilter(String),

    #[error("Invalid completion filter: expected all, completed or incomplete, got '{0}'")]
    InvalidCompletionFilter(String),
}

/// Which priorities to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    /// Returns true if a task with this priority passes the filter
    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::High => priority == Priority::High,
            PriorityFilter::Medium => priority == Priority::Medium,
            PriorityFilter::Low => priority == Priority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityFilter::All => "All",
            PriorityFilter::High => "High",
            PriorityFilter::Medium => "Medium",
            PriorityFilter::Low => "Low",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PriorityFilter::All => PriorityFilter::High,
            PriorityFilter::High => PriorityFilter::Medium,
            PriorityFilter::Medium => PriorityFilter::Low,
            PriorityFilter::Low => PriorityFilter::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PriorityFilter::All => PriorityFilter::Low,
            PriorityFilter::High => PriorityFilter::All,
            PriorityFilter::Medium => PriorityFilter::High,
            PriorityFilter::Low => PriorityFilter::Medium,
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => PriorityFilter::High,
            Priority::Medium => PriorityFilter::Medium,
            Priority::Low => PriorityFilter::Low,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PriorityFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>()
            .map(PriorityFilter::from)
            .map_err(|_| FilterError::InvalidPriorityFilter(s.to_string()))
    }
}

/// Which completion states to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompletionFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl CompletionFilter {
    /// Returns true if a task with this completion flag passes the filter
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            CompletionFilter::All => true,
            CompletionFilter::Completed => completed,
            CompletionFilter::Incomplete => !completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionFilter::All => "All",
            CompletionFilter::Completed => "Completed",
            CompletionFilter::Incomplete => "Incomplete",
        }
    }

    pub fn next(self) -> Self {
        match self {
            CompletionFilter::All => CompletionFilter::Completed,
            CompletionFilter::Completed => CompletionFilter::Incomplete,
            CompletionFilter::Incomplete => CompletionFilter::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CompletionFilter::All => CompletionFilter::Incomplete,
            CompletionFilter::Completed => CompletionFilter::All,
            CompletionFilter::Incomplete => CompletionFilter::Completed,
        }
    }
}

impl fmt::Display for CompletionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CompletionFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CompletionFilter::All),
            "completed" | "complete" | "done" => Ok(CompletionFilter::Completed),
            "incomplete" | "open" | "todo" => Ok(CompletionFilter::Incomplete),
            _ => Err(FilterError::InvalidCompletionFilter(s.to_string())),
        }
    }
}

/// Derives the displayed sequence from the store and the two filters
///
/// Keeps tasks passing both filters, then orders them High, Medium, Low.
/// The sort is stable, so equal priorities keep insertion order.
pub fn project(
    tasks: &[Task],
    priority_filter: PriorityFilter,
    completion_filter: CompletionFilter,
) -> Vec<&Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| priority_filter.matches(t.priority))
        .filter(|t| completion_filter.matches(t.completed))
        .collect();

    visible.sort_by_key(|t| t.priority.rank());
    visible
}
