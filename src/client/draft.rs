use chrono::NaiveDate;

use crate::{tag::Tag, task::Task, task_id::TaskId, task_priority::TaskPriority};

/// The add/edit form: everything about a task except its id and completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<Tag>,
}

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            priority: task.priority,
            due_date: task.due_date,
            tags: task.tags.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&mut self, tag: Tag) {
        if let Some(pos) = self.tags.iter().position(|t| *t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag);
        }
    }

    pub fn into_task(self, id: TaskId, completed: bool) -> Task {
        Task {
            id,
            text: self.text,
            completed,
            priority: self.priority,
            due_date: self.due_date,
            tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_blank() {
        assert!(Draft::new("").is_blank());
        assert!(Draft::new(" \t\n").is_blank());
        assert!(!Draft::new(" x ").is_blank());
    }

    #[test]
    fn toggle_tag_adds_then_removes() {
        let mut draft = Draft::new("x");
        draft.toggle_tag(Tag::Work);
        draft.toggle_tag(Tag::Study);
        assert_eq!(draft.tags, [Tag::Work, Tag::Study]);
        draft.toggle_tag(Tag::Work);
        assert_eq!(draft.tags, [Tag::Study]);
    }

    #[test]
    fn task_round_trip_keeps_fields() {
        let mut task = Task::new(TaskId(4), "Write report");
        task.priority = TaskPriority::High;
        task.tags = vec![Tag::Work];
        task.completed = true;

        let draft = Draft::from_task(&task);
        assert_eq!(draft.into_task(task.id, task.completed), task);
    }
}
