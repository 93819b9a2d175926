//! The board: input state plus the task store
//!
//! Front ends drive a [`Board`] with discrete user actions and call
//! [`Board::visible`] afterwards to get what should be on screen.

use super::filter::{project, CompletionFilter, PriorityFilter};
use super::form::InputState;
use super::id::TaskId;
use super::store::TaskList;
use super::task::{Priority, Task, TaskError};

/// State container for one task list session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    tasks: TaskList,
    input: InputState,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty board with the given initial filters
    pub fn with_filters(priority_filter: PriorityFilter, completion_filter: CompletionFilter) -> Self {
        Self {
            tasks: TaskList::new(),
            input: InputState::with_filters(priority_filter, completion_filter),
        }
    }

    /// Adds a task from the pending form fields
    ///
    /// On success the form is reset. On failure neither the store nor the
    /// form changes, and the caller must show the error to the user.
    pub fn add_task(&mut self) -> Result<TaskId, TaskError> {
        let id = self
            .tasks
            .add(self.input.pending_title(), self.input.pending_priority())?;
        self.input.reset_form();
        Ok(id)
    }

    /// Inverts completion of a task; unknown IDs are ignored
    pub fn toggle_completion(&mut self, id: TaskId) -> bool {
        self.tasks.toggle(id)
    }

    /// Removes a task; unknown IDs are ignored
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.tasks.delete(id)
    }

    pub fn set_pending_title(&mut self, title: impl Into<String>) {
        self.input.set_pending_title(title);
    }

    pub fn set_pending_priority(&mut self, priority: Priority) {
        self.input.set_pending_priority(priority);
    }

    pub fn set_priority_filter(&mut self, filter: PriorityFilter) {
        self.input.set_priority_filter(filter);
    }

    pub fn set_completion_filter(&mut self, filter: CompletionFilter) {
        self.input.set_completion_filter(filter);
    }

    /// Current projection under the active filters
    pub fn visible(&self) -> Vec<&Task> {
        project(
            self.tasks.tasks(),
            self.input.priority_filter(),
            self.input.completion_filter(),
        )
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(board: &Board) -> Vec<String> {
        board.visible().iter().map(|t| t.title.clone()).collect()
    }

    fn add(board: &mut Board, title: &str, priority: Priority) -> Result<TaskId, TaskError> {
        board.set_pending_title(title);
        board.set_pending_priority(priority);
        board.add_task()
    }

    /// Buy milk (High) then Call Bob (Low)
    fn scenario_a() -> (Board, TaskId, TaskId) {
        let mut board = Board::new();
        let milk = add(&mut board, "Buy milk", Priority::High).unwrap();
        let bob = add(&mut board, "Call Bob", Priority::Low).unwrap();
        (board, milk, bob)
    }

    #[test]
    fn scenario_a_high_before_low() {
        let (board, _, _) = scenario_a();
        assert_eq!(titles(&board), vec!["Buy milk", "Call Bob"]);
    }

    #[test]
    fn scenario_b_blank_title_rejected() {
        let (mut board, _, _) = scenario_a();
        let tasks_before = board.tasks().clone();

        assert_eq!(add(&mut board, "   ", Priority::Medium), Err(TaskError::EmptyTitle));
        assert_eq!(board.tasks(), &tasks_before);
        assert_eq!(board.tasks().len(), 2);
        // the form is left as the user typed it
        assert_eq!(board.input().pending_title(), "   ");
        assert_eq!(board.input().pending_priority(), Priority::Medium);
    }

    #[test]
    fn scenario_c_toggle_then_incomplete() {
        let (mut board, milk, _) = scenario_a();
        board.toggle_completion(milk);
        board.set_completion_filter(CompletionFilter::Incomplete);
        assert_eq!(titles(&board), vec!["Call Bob"]);
    }

    #[test]
    fn scenario_d_low_filter() {
        let (mut board, _, _) = scenario_a();
        board.set_priority_filter(PriorityFilter::Low);
        assert_eq!(titles(&board), vec!["Call Bob"]);
    }

    #[test]
    fn scenario_e_delete_then_all() {
        let (mut board, milk, _) = scenario_a();
        board.set_priority_filter(PriorityFilter::High);
        board.delete_task(milk);
        board.set_priority_filter(PriorityFilter::All);
        assert_eq!(titles(&board), vec!["Call Bob"]);
    }

    #[test]
    fn successful_add_resets_form() {
        let mut board = Board::new();
        add(&mut board, "Water plants", Priority::Low).unwrap();
        assert_eq!(board.input().pending_title(), "");
        assert_eq!(board.input().pending_priority(), Priority::High);
    }

    #[test]
    fn add_keeps_title_as_typed() {
        let mut board = Board::new();
        let id = add(&mut board, "  spaced  ", Priority::Medium).unwrap();
        assert_eq!(board.tasks().get(id).unwrap().title, "  spaced  ");
    }

    #[test]
    fn with_filters_applies_initial_selection() {
        let mut board = Board::with_filters(PriorityFilter::Medium, CompletionFilter::All);
        add(&mut board, "hidden", Priority::High).unwrap();
        add(&mut board, "shown", Priority::Medium).unwrap();
        assert_eq!(titles(&board), vec!["shown"]);
    }
}
