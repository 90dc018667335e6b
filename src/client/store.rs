//! Client-side application state.
//!
//! `TaskStore` owns everything the UI shows: the last-fetched list, the
//! draft form, the task being edited, the search term, the theme flag, the
//! loading flag and the notification queue. All mutation goes through
//! `&mut self`, so there is exactly one writer and at most one request in
//! flight.
//!
//! Every mutating call sends one request, refetches the whole list on
//! success, and raises exactly one notification whether it worked or not.

use chrono::{DateTime, Utc};

use super::{
    analytics::Analytics,
    api::TaskApi,
    draft::Draft,
    error::ClientError,
    notification::{Notification, Notifications, Severity},
    reminder, reorder, search,
};
use crate::{task::Task, task_id::TaskId};

const EMPTY_TEXT: &str = "Task cannot be empty.";

pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct TaskStore<A> {
    api: A,
    tasks: Vec<Task>,
    draft: Draft,
    editing: Option<TaskId>,
    search_term: String,
    dark_mode: bool,
    loading: bool,
    notifications: Notifications,
    last_issued: Option<TaskId>,
    clock: Clock,
}

impl<A: TaskApi> TaskStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            draft: Draft::default(),
            editing: None,
            search_term: String::new(),
            dark_mode: false,
            loading: false,
            notifications: Notifications::default(),
            last_issued: None,
            clock: Box::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ── Views ───────────────────────────────────────────────────

    /// The list exactly as last fetched.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// The list narrowed by the current search term.
    pub fn filtered(&self) -> Vec<&Task> {
        search::filter_tasks(&self.tasks, &self.search_term)
    }

    pub fn analytics(&self) -> Analytics {
        Analytics::compute(&self.tasks)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Notifications still visible now, oldest first.
    pub fn notifications(&self) -> Vec<&Notification> {
        self.notifications.active((self.clock)()).collect()
    }

    /// The raw queue, expired entries included until the next push.
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    // ── Draft / edit form ───────────────────────────────────────

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    /// Load a task into the draft form.
    pub fn start_edit(&mut self, id: TaskId) -> Result<(), ClientError> {
        let task = self.get(id).ok_or(ClientError::NotFound(id))?;
        self.draft = Draft::from_task(task);
        self.editing = Some(id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft = Draft::default();
    }

    /// Send the draft form: saves the edit in progress, or adds a new task.
    /// The form is cleared only on success.
    pub async fn submit(&mut self) -> Result<Task, ClientError> {
        let draft = self.draft.clone();
        let result = match self.editing {
            Some(id) => self.update(id, draft).await,
            None => self.add(draft).await,
        };
        if result.is_ok() {
            self.cancel_edit();
        }
        result
    }

    // ── Server round trips ──────────────────────────────────────

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.list().await;
        self.loading = false;
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => {
                self.notify(Severity::Error, "Failed to fetch tasks.");
                Err(e)
            }
        }
    }

    pub async fn add(&mut self, draft: Draft) -> Result<Task, ClientError> {
        if draft.is_blank() {
            self.notify(Severity::Error, EMPTY_TEXT);
            return Err(ClientError::Validation(EMPTY_TEXT.to_string()));
        }

        let task = draft.into_task(self.next_id(), false);
        self.loading = true;
        let result = match self.api.create(&task).await {
            Ok(created) => {
                self.reload().await;
                self.notify(Severity::Success, "Task added successfully!");
                Ok(created)
            }
            Err(e) => {
                self.notify(Severity::Error, "Failed to add task.");
                Err(e)
            }
        };
        self.loading = false;
        result
    }

    /// Replace text, priority, due date and tags; completion is kept.
    pub async fn update(&mut self, id: TaskId, fields: Draft) -> Result<Task, ClientError> {
        if fields.is_blank() {
            self.notify(Severity::Error, EMPTY_TEXT);
            return Err(ClientError::Validation(EMPTY_TEXT.to_string()));
        }
        let Some(current) = self.get(id) else {
            self.notify(Severity::Error, "Failed to update task.");
            return Err(ClientError::NotFound(id));
        };

        let replacement = fields.into_task(id, current.completed);
        self.replace(id, replacement, "Task updated successfully!".to_string(), Severity::Success)
            .await
    }

    pub async fn toggle(&mut self, id: TaskId) -> Result<Task, ClientError> {
        let Some(current) = self.get(id) else {
            self.notify(Severity::Error, "Failed to update task.");
            return Err(ClientError::NotFound(id));
        };

        let replacement = current.toggled();
        let state = if replacement.completed { "completed" } else { "pending" };
        let message = format!("Task \"{}\" marked as {}.", current.text, state);
        self.replace(id, replacement, message, Severity::Info).await
    }

    pub async fn remove(&mut self, id: TaskId) -> Result<(), ClientError> {
        self.loading = true;
        let result = match self.api.delete(id).await {
            Ok(()) => {
                self.reload().await;
                self.notify(Severity::Success, "Task deleted successfully!");
                Ok(())
            }
            Err(e) => {
                self.notify(Severity::Error, "Failed to delete task.");
                Err(e)
            }
        };
        self.loading = false;
        result
    }

    /// Drop `dragged` onto `target` and save the resulting order. On failure
    /// the previous order is restored. Returns false when nothing moved.
    pub async fn move_task(&mut self, dragged: TaskId, target: TaskId) -> Result<bool, ClientError> {
        let previous = self.tasks.clone();
        if !reorder::move_task(&mut self.tasks, dragged, target) {
            return Ok(false);
        }

        let ids: Vec<TaskId> = self.tasks.iter().map(|t| t.id).collect();
        self.loading = true;
        let result = match self.api.reorder(&ids).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.notify(Severity::Info, "Task order saved.");
                Ok(true)
            }
            Err(e) => {
                self.tasks = previous;
                self.notify(Severity::Error, "Failed to save task order.");
                Err(e)
            }
        };
        self.loading = false;
        result
    }

    // ── Reminders ───────────────────────────────────────────────

    pub fn check_reminders(&mut self) -> usize {
        let now = (self.clock)();
        self.check_reminders_at(now)
    }

    /// One warning per open task due within 24 hours of `now`.
    pub fn check_reminders_at(&mut self, now: DateTime<Utc>) -> usize {
        let messages: Vec<String> = reminder::due_soon(&self.tasks, now)
            .into_iter()
            .map(reminder::reminder_message)
            .collect();
        self.notifications.prune(now);
        for message in &messages {
            self.notifications.push(Severity::Warning, message.as_str(), now);
        }
        messages.len()
    }

    // ── Internals ───────────────────────────────────────────────

    async fn replace(
        &mut self,
        id: TaskId,
        replacement: Task,
        success: String,
        severity: Severity,
    ) -> Result<Task, ClientError> {
        self.loading = true;
        let result = match self.api.replace(id, &replacement).await {
            Ok(saved) => {
                self.reload().await;
                self.notify(severity, success);
                Ok(saved)
            }
            Err(e) => {
                self.notify(Severity::Error, "Failed to update task.");
                Err(e)
            }
        };
        self.loading = false;
        result
    }

    /// Refetch after a successful mutation. A failure here keeps the old
    /// list; the mutation's own notification already went out.
    async fn reload(&mut self) {
        match self.api.list().await {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => tracing::warn!(error = %e, "refetch failed, keeping previous list"),
        }
    }

    /// Wall-clock millis, bumped past the last id this store issued.
    fn next_id(&mut self) -> TaskId {
        let candidate = TaskId::generate((self.clock)());
        let id = match self.last_issued {
            Some(last) if candidate <= last => TaskId(last.get() + 1),
            _ => candidate,
        };
        self.last_issued = Some(id);
        id
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        let now = (self.clock)();
        self.notifications.prune(now);
        self.notifications.push(severity, message, now);
    }
}
