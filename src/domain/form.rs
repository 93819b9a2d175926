//! Input state for the add form and the filter selectors

use super::filter::{CompletionFilter, PriorityFilter};
use super::task::Priority;

/// Pending add-form fields and active filter selections
///
/// Every setter is a plain overwrite; nothing here validates beyond the
/// types themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pending_title: String,
    pending_priority: Priority,
    priority_filter: PriorityFilter,
    completion_filter: CompletionFilter,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates input state with the given initial filter selections
    pub fn with_filters(priority_filter: PriorityFilter, completion_filter: CompletionFilter) -> Self {
        Self {
            priority_filter,
            completion_filter,
            ..Self::default()
        }
    }

    pub fn set_pending_title(&mut self, title: impl Into<String>) {
        self.pending_title = title.into();
    }

    pub fn set_pending_priority(&mut self, priority: Priority) {
        self.pending_priority = priority;
    }

    pub fn set_priority_filter(&mut self, filter: PriorityFilter) {
        self.priority_filter = filter;
    }

    pub fn set_completion_filter(&mut self, filter: CompletionFilter) {
        self.completion_filter = filter;
    }

    /// Clears the title and puts the priority back to `High`
    pub fn reset_form(&mut self) {
        self.pending_title.clear();
        self.pending_priority = Priority::High;
    }

    pub fn pending_title(&self) -> &str {
        &self.pending_title
    }

    pub fn pending_priority(&self) -> Priority {
        self.pending_priority
    }

    pub fn priority_filter(&self) -> PriorityFilter {
        self.priority_filter
    }

    pub fn completion_filter(&self) -> CompletionFilter {
        self.completion_filter
    }
}
