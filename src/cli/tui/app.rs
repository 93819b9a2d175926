//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::domain::{Board, Task, TaskId};

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the title field
    EditTitle,
    Confirm(ConfirmAction),
    /// Blocking notice; only dismiss keys are accepted
    Alert(String),
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(TaskId),
}

/// Application state
pub struct App {
    /// Tasks plus form and filter state
    board: Board,

    /// IDs of the current projection, in display order
    visible: Vec<TaskId>,

    /// Selected row in `visible`
    selected: usize,

    /// Input mode
    input_mode: InputMode,

    /// Status message to display
    status_message: Option<String>,

    /// Ask before deleting
    confirm_delete: bool,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application around a board
    pub fn new(board: Board, confirm_delete: bool) -> Self {
        let mut app = Self {
            board,
            visible: Vec::new(),
            selected: 0,
            input_mode: InputMode::Normal,
            status_message: None,
            confirm_delete,
            should_quit: false,
        };
        app.update_visible();
        app
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    /// Draw the UI
    fn draw(&self, frame: &mut Frame) {
        views::board::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::EditTitle => self.handle_edit_key(key),
            InputMode::Confirm(_) => self.handle_confirm_key(key),
            InputMode::Alert(_) => self.handle_alert_key(key),
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection_up(),

            // Add form
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('i') => {
                self.input_mode = InputMode::EditTitle;
            }
            KeyCode::Tab => self.cycle_pending_priority(true),
            KeyCode::BackTab => self.cycle_pending_priority(false),

            // Task actions
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),

            // Filters
            KeyCode::Char('p') => self.cycle_priority_filter(true),
            KeyCode::Char('P') => self.cycle_priority_filter(false),
            KeyCode::Char('c') => self.cycle_completion_filter(true),
            KeyCode::Char('C') => self.cycle_completion_filter(false),

            KeyCode::Char('?') => {
                self.status_message = Some(
                    "a:add j/k:move space:toggle d:delete p/P:priority filter c/C:completion filter tab:pending priority q:quit"
                        .to_string(),
                );
            }

            _ => {}
        }
    }

    /// Handle keys while typing a title
    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.add_task(),
            KeyCode::Tab => self.cycle_pending_priority(true),
            KeyCode::BackTab => self.cycle_pending_priority(false),
            KeyCode::Backspace => {
                let mut title = self.board.input().pending_title().to_string();
                title.pop();
                self.board.set_pending_title(title);
            }
            KeyCode::Char(c) => {
                let mut title = self.board.input().pending_title().to_string();
                title.push(c);
                self.board.set_pending_title(title);
            }
            _ => {}
        }
    }

    /// Handle keys in confirm mode
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::Confirm(ConfirmAction::DeleteTask(id)) = self.input_mode {
                    self.do_delete(id);
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Handle keys while a notice is up
    fn handle_alert_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.input_mode = InputMode::EditTitle;
        }
    }

    /// Press "Add Task"
    fn add_task(&mut self) {
        match self.board.add_task() {
            Ok(id) => {
                let title = self
                    .board
                    .tasks()
                    .get(id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.status_message = Some(format!("Added: {}", title));
                self.update_visible();
            }
            Err(e) => {
                self.input_mode = InputMode::Alert(e.to_string());
            }
        }
    }

    /// Toggle completion of the selected task
    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.board.toggle_completion(id) {
                if let Some(task) = self.board.tasks().get(id) {
                    let verb = if task.completed { "Completed" } else { "Reopened" };
                    self.status_message = Some(format!("{}: {}", verb, task.title));
                }
                self.update_visible();
            }
        }
    }

    /// Delete the selected task, asking first if configured to
    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.confirm_delete {
                self.input_mode = InputMode::Confirm(ConfirmAction::DeleteTask(id));
            } else {
                self.do_delete(id);
            }
        }
    }

    fn do_delete(&mut self, id: TaskId) {
        let title = self.board.tasks().get(id).map(|t| t.title.clone());
        if self.board.delete_task(id) {
            self.status_message = Some(format!("Deleted: {}", title.unwrap_or_default()));
            self.update_visible();
        }
    }

    fn cycle_priority_filter(&mut self, forward: bool) {
        let current = self.board.input().priority_filter();
        let next = if forward { current.next() } else { current.prev() };
        self.board.set_priority_filter(next);
        self.update_visible();
    }

    fn cycle_completion_filter(&mut self, forward: bool) {
        let current = self.board.input().completion_filter();
        let next = if forward { current.next() } else { current.prev() };
        self.board.set_completion_filter(next);
        self.update_visible();
    }

    fn cycle_pending_priority(&mut self, forward: bool) {
        let current = self.board.input().pending_priority();
        let next = if forward { current.next() } else { current.prev() };
        self.board.set_pending_priority(next);
    }

    /// Re-derive the projection after any change to tasks or filters
    fn update_visible(&mut self) {
        self.visible = self.board.visible().iter().map(|t| t.id).collect();

        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn move_selection_down(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1) % self.visible.len();
        }
    }

    fn move_selection_up(&mut self) {
        if !self.visible.is_empty() {
            self.selected = if self.selected == 0 {
                self.visible.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.visible.get(self.selected).copied()
    }

    // Public accessors for views

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tasks in display order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.visible
            .iter()
            .filter_map(|id| self.board.tasks().get(*id))
            .collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.visible.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.board.tasks().get(id))
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionFilter, Priority, PriorityFilter};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn titles(app: &App) -> Vec<String> {
        app.visible_tasks().iter().map(|t| t.title.clone()).collect()
    }

    /// Adds Buy milk (High) and Call Bob (Low) through the keyboard
    fn scenario_a() -> App {
        let mut app = App::new(Board::new(), false);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Call Bob");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        app
    }

    // ==========================================================================
    // Add form
    // ==========================================================================

    #[test]
    fn scenario_a_adds_in_priority_order() {
        let app = scenario_a();
        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(titles(&app), vec!["Buy milk", "Call Bob"]);
        assert_eq!(app.board().tasks().tasks()[1].priority, Priority::Low);
        assert_eq!(app.status_message(), Some("Added: Call Bob"));
    }

    #[test]
    fn add_resets_form_fields() {
        let app = scenario_a();
        assert_eq!(app.board().input().pending_title(), "");
        assert_eq!(app.board().input().pending_priority(), Priority::High);
    }

    #[test]
    fn blank_title_raises_blocking_alert() {
        let mut app = scenario_a();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.input_mode(),
            &InputMode::Alert("Task title cannot be empty".to_string())
        );
        assert_eq!(app.board().tasks().len(), 2);

        // other keys are swallowed while the alert is up
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.should_quit());
        assert_eq!(app.board().input().pending_title(), "   ");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode(), &InputMode::EditTitle);
        assert_eq!(app.board().tasks().len(), 2);
    }

    #[test]
    fn backspace_edits_title() {
        let mut app = App::new(Board::new(), false);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Buy milkk");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.board().input().pending_title(), "Buy milk");

        // leaving edit mode keeps what was typed
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.board().input().pending_title(), "Buy milk");
    }

    #[test]
    fn letters_in_edit_mode_are_text_not_commands() {
        let mut app = App::new(Board::new(), false);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "quit");
        assert!(!app.should_quit());
        assert_eq!(app.board().input().pending_title(), "quit");
    }

    // ==========================================================================
    // Task actions
    // ==========================================================================

    #[test]
    fn scenario_c_toggle_then_incomplete_filter() {
        let mut app = scenario_a();
        assert_eq!(app.selected_task().unwrap().title, "Buy milk");

        press(&mut app, KeyCode::Char(' '));
        assert!(app.board().tasks().tasks()[0].completed);
        assert_eq!(app.status_message(), Some("Completed: Buy milk"));

        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.board().input().completion_filter(), CompletionFilter::Incomplete);
        assert_eq!(titles(&app), vec!["Call Bob"]);
    }

    #[test]
    fn scenario_d_low_filter() {
        let mut app = scenario_a();
        press(&mut app, KeyCode::Char('P'));
        assert_eq!(app.board().input().priority_filter(), PriorityFilter::Low);
        assert_eq!(titles(&app), vec!["Call Bob"]);
    }

    #[test]
    fn scenario_e_delete_then_all() {
        let mut app = scenario_a();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(titles(&app), vec!["Call Bob"]);

        for _ in 0..4 {
            press(&mut app, KeyCode::Char('p'));
        }
        assert_eq!(app.board().input().priority_filter(), PriorityFilter::All);
        assert_eq!(titles(&app), vec!["Call Bob"]);
    }

    #[test]
    fn delete_with_confirmation() {
        let mut app = App::new(Board::new(), true);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.input_mode(), InputMode::Confirm(_)));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.board().tasks().len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert!(app.board().tasks().is_empty());
        assert_eq!(app.selected_index(), None);
    }

    #[test]
    fn toggle_twice_restores() {
        let mut app = scenario_a();
        let before = app.board().clone();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.board(), &before);
        assert_eq!(app.status_message(), Some("Reopened: Buy milk"));
    }

    #[test]
    fn actions_on_empty_list_are_noops() {
        let mut app = App::new(Board::new(), false);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('j'));
        assert!(app.board().tasks().is_empty());
        assert_eq!(app.input_mode(), &InputMode::Normal);
    }

    // ==========================================================================
    // Selection
    // ==========================================================================

    #[test]
    fn selection_wraps() {
        let mut app = scenario_a();
        assert_eq!(app.selected_index(), Some(0));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_index(), Some(1));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index(), Some(0));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_index(), Some(1));
    }

    #[test]
    fn selection_clamped_when_row_disappears() {
        let mut app = scenario_a();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_task().unwrap().title, "Call Bob");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.selected_index(), Some(0));
        assert_eq!(app.selected_task().unwrap().title, "Buy milk");
    }

    // ==========================================================================
    // Quit
    // ==========================================================================

    #[test]
    fn quit_keys() {
        let mut app = App::new(Board::new(), false);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = App::new(Board::new(), false);
        press(&mut app, KeyCode::Char('a'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn input_mode_default_is_normal() {
        assert_eq!(InputMode::default(), InputMode::Normal);
    }
}
