use std::collections::BTreeMap;

use crate::{task::Task, task_priority::TaskPriority};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analytics {
    pub total: usize,
    pub completed: usize,
    /// Rounded to the nearest whole percent; 0 for an empty list.
    pub completion_percent: u8,
    /// Only priorities that occur at least once.
    pub by_priority: BTreeMap<TaskPriority, usize>,
}

impl Analytics {
    pub fn compute(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_percent = if total > 0 {
            (completed as f64 / total as f64 * 100.0).round() as u8
        } else {
            0
        };

        let mut by_priority = BTreeMap::new();
        for task in tasks {
            *by_priority.entry(task.priority).or_insert(0) += 1;
        }

        Self {
            total,
            completed,
            completion_percent,
            by_priority,
        }
    }

    pub fn count(&self, priority: TaskPriority) -> usize {
        self.by_priority.get(&priority).copied().unwrap_or(0)
    }
}
