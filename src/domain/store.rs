//! In-memory task store
//!
//! [`TaskList`] owns the authoritative, insertion-ordered sequence of
//! tasks. Every mutation builds a fresh `Vec` and swaps it in, so two
//! snapshots can be compared by value to detect a change.

use super::id::{TaskId, TaskIdSequence};
use super::task::{Priority, Task, TaskError};

/// Ordered collection of tasks plus the ID sequence that feeds it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
    ids: TaskIdSequence,
}

impl TaskList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new task
    ///
    /// Blank titles are rejected before an ID is allocated, leaving the
    /// list untouched.
    pub fn add(&mut self, title: impl Into<String>, priority: Priority) -> Result<TaskId, TaskError> {
        let task = Task::new(self.ids.peek(), title, priority)?;
        let id = self.ids.next_id();

        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.extend(self.tasks.iter().cloned());
        tasks.push(task);
        self.tasks = tasks;

        Ok(id)
    }

    /// Inverts the completion flag of a task
    ///
    /// Returns false (and changes nothing) if no task has this ID.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        if !self.contains(id) {
            return false;
        }

        self.tasks = self
            .tasks
            .iter()
            .map(|t| if t.id == id { t.toggled() } else { t.clone() })
            .collect();
        true
    }

    /// Removes a task permanently
    ///
    /// Returns false (and changes nothing) if no task has this ID.
    pub fn delete(&mut self, id: TaskId) -> bool {
        if !self.contains(id) {
            return false;
        }

        self.tasks = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        true
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by ID
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks marked complete
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn titles(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let mut list = TaskList::new();
        list.add("Buy milk", Priority::High).unwrap();
        list.add("Call Bob", Priority::Low).unwrap();
        list.add("Water plants", Priority::Medium).unwrap();

        assert_eq!(titles(&list), vec!["Buy milk", "Call Bob", "Water plants"]);
        assert!(list.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn add_rejects_blank_without_consuming_id() {
        let mut list = TaskList::new();
        let first = list.add("Buy milk", Priority::High).unwrap();
        let before = list.clone();

        assert_eq!(list.add("   ", Priority::Medium), Err(TaskError::EmptyTitle));
        assert_eq!(list, before);

        let second = list.add("Call Bob", Priority::Low).unwrap();
        assert_eq!(second.value(), first.value() + 1);
    }

    #[test]
    fn toggle_flips_target_only() {
        let mut list = TaskList::new();
        let a = list.add("A", Priority::High).unwrap();
        let b = list.add("B", Priority::Low).unwrap();

        assert!(list.toggle(a));
        assert!(list.get(a).unwrap().completed);
        assert!(!list.get(b).unwrap().completed);
        assert_eq!(titles(&list), vec!["A", "B"]);
        assert_eq!(list.completed_count(), 1);
    }

    #[test]
    fn toggle_unknown_is_noop() {
        let mut list = TaskList::new();
        list.add("A", Priority::High).unwrap();
        let before = list.clone();

        assert!(!list.toggle("99".parse().unwrap()));
        assert_eq!(list, before);
    }

    #[test]
    fn delete_keeps_relative_order() {
        let mut list = TaskList::new();
        list.add("A", Priority::High).unwrap();
        let b = list.add("B", Priority::High).unwrap();
        list.add("C", Priority::High).unwrap();

        assert!(list.delete(b));
        assert_eq!(titles(&list), vec!["A", "C"]);
        assert!(list.get(b).is_none());
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut list = TaskList::new();
        let a = list.add("A", Priority::High).unwrap();
        assert!(list.delete(a));
        let before = list.clone();

        assert!(!list.delete(a));
        assert_eq!(list, before);
    }

    #[test]
    fn ids_not_reused_after_delete() {
        let mut list = TaskList::new();
        let a = list.add("A", Priority::High).unwrap();
        list.delete(a);
        let b = list.add("B", Priority::High).unwrap();
        assert_ne!(a, b);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, Priority),
        Toggle(u64),
        Delete(u64),
    }

    fn priority_strategy() -> impl Strategy<Value = Priority> {
        prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            ("[ a-z]{0,6}", priority_strategy()).prop_map(|(t, p)| Op::Add(t, p)),
            (1u64..12).prop_map(Op::Toggle),
            (1u64..12).prop_map(Op::Delete),
        ]
    }

    fn apply(list: &mut TaskList, op: &Op) {
        match op {
            Op::Add(title, priority) => {
                let _ = list.add(title.clone(), *priority);
            }
            Op::Toggle(n) => {
                list.toggle(n.to_string().parse().unwrap());
            }
            Op::Delete(n) => {
                list.delete(n.to_string().parse().unwrap());
            }
        }
    }

    proptest! {
        #[test]
        fn stored_titles_never_blank(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut list = TaskList::new();
            for op in &ops {
                apply(&mut list, op);
            }
            prop_assert!(list.tasks().iter().all(|t| !t.title.trim().is_empty()));
        }

        #[test]
        fn ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut list = TaskList::new();
            for op in &ops {
                apply(&mut list, op);
            }
            let mut ids: Vec<_> = list.tasks().iter().map(|t| t.id).collect();
            let len = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);
        }

        #[test]
        fn double_toggle_restores(
            ops in prop::collection::vec(op_strategy(), 1..30),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut list = TaskList::new();
            for op in &ops {
                apply(&mut list, op);
            }
            prop_assume!(!list.is_empty());

            let id = list.tasks()[pick.index(list.len())].id;
            let before = list.clone();
            list.toggle(id);
            list.toggle(id);
            prop_assert_eq!(list, before);
        }
    }
}
