//! Status counts for the summary cards.

use crate::model::task::{Task, TaskStatus};

/// Per-status counts over the whole collection.
///
/// Counted from the unfiltered collection; the list view's criteria do not
/// change these numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl TaskStats {
    /// Counts statuses across `tasks`.
    pub fn collect(tasks: &[Task]) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            stats.total += 1;
            match task.status {
                TaskStatus::NotStarted => stats.not_started += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.done += 1,
            }
        }
        stats
    }
}
