//! Taskboard - a single-screen task board
//!
//! Tasks carry a title, a priority and a completion flag. The board
//! shows them through a priority filter and a completion filter, sorted
//! High before Medium before Low.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Board, CompletionFilter, Priority, PriorityFilter, Task, TaskId, TaskList};
