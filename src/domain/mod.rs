//! Domain models for Taskboard
//!
//! Contains the task list state and projection without any I/O concerns.

mod id;
mod task;
mod store;
mod filter;
mod form;
mod board;

pub use id::{IdError, TaskId, TaskIdSequence};
pub use task::{validate_title, Priority, Task, TaskError};
pub use store::TaskList;
pub use filter::{project, CompletionFilter, FilterError, PriorityFilter};
pub use form::InputState;
pub use board::Board;
