use async_trait::async_trait;

use crate::error::Result;
use crate::event::Event;
use crate::filter::{Role, TaskFilter};
use crate::notification::Notification;
use crate::task::{MutationAck, Task, TaskDraft, TaskId, TaskUpdate};
use crate::user::{Department, User};
use crate::utils::DateRange;

/// A source of tasks and events. Usually a [`Client`](crate::client::Client) talking to the server,
/// or a [`MockBackend`](crate::mock_backend::MockBackend) in tests
#[async_trait]
pub trait TaskBackend {
    /// Returns the tasks matching `filter`. Filtering happens on the backend side
    async fn get_tasks(&self, filter: &TaskFilter, role: Role) -> Result<Vec<Task>>;
    /// Returns every user, active or not
    async fn get_users(&self) -> Result<Vec<User>>;
    async fn get_departments(&self) -> Result<Vec<Department>>;

    async fn create_task(&self, draft: &TaskDraft) -> Result<MutationAck>;
    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<MutationAck>;
    async fn delete_task(&self, id: TaskId) -> Result<MutationAck>;
    /// Marks a task as completed, on behalf of its assignee
    async fn complete_task(&self, id: TaskId) -> Result<MutationAck>;

    /// Returns the events whose date falls within `range` (bounds included)
    async fn get_events(&self, range: DateRange) -> Result<Vec<Event>>;
}

/// Where user-facing notifications go (a toast area, a status bar, the log...)
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}
