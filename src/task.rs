//! Tasks, as served by the `/api/tasks` endpoints

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::user::UserId;
use crate::utils::capitalize;

pub type TaskId = u64;

/// How urgent a task is. The ordering is `Low < Medium < High`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// `Low`, `Medium` or `High`
    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The stored status of a task.
///
/// `Pending -> Completed` is the only transition a regular user can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a task row shows as its status.
///
/// `Overdue` is never stored: the backend derives it and sends it as `is_overdue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayStatus {
    Pending,
    Completed,
    Overdue,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Pending => "pending",
            DisplayStatus::Completed => "completed",
            DisplayStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

/// A task, as returned by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(with = "crate::utils::day_format")]
    due_date: NaiveDate,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: Priority,

    #[serde(default)]
    assignee_id: Option<UserId>,
    /// Username of the assignee
    #[serde(default)]
    assignee: Option<String>,
    /// Full name of the assignee
    #[serde(default)]
    assignee_name: Option<String>,
    #[serde(default)]
    creator: Option<String>,
    #[serde(default, with = "crate::utils::opt_day_format")]
    created_at: Option<NaiveDate>,

    /// Computed by the backend: pending and due in the past
    #[serde(default)]
    is_overdue: bool,
}

impl Task {
    /// Create a pending, unassigned task
    pub fn new<S: ToString>(id: TaskId, title: S, due_date: NaiveDate, priority: Priority) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: None,
            due_date,
            status: TaskStatus::Pending,
            priority,
            assignee_id: None,
            assignee: None,
            assignee_name: None,
            creator: None,
            created_at: None,
            is_overdue: false,
        }
    }

    pub fn with_description<S: ToString>(mut self, description: S) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_assignee<S: ToString>(mut self, assignee_id: UserId, name: S) -> Self {
        self.assignee_id = Some(assignee_id);
        self.assignee_name = Some(name.to_string());
        self
    }

    pub fn with_creator<S: ToString>(mut self, creator: S) -> Self {
        self.creator = Some(creator.to_string());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_overdue(mut self, is_overdue: bool) -> Self {
        self.is_overdue = is_overdue;
        self
    }

    pub fn id(&self) -> TaskId                 { self.id }
    pub fn title(&self) -> &str                { &self.title }
    pub fn description(&self) -> Option<&str>  { self.description.as_deref() }
    pub fn due_date(&self) -> NaiveDate        { self.due_date }
    pub fn status(&self) -> TaskStatus         { self.status }
    pub fn priority(&self) -> Priority         { self.priority }
    pub fn assignee_id(&self) -> Option<UserId> { self.assignee_id }
    pub fn assignee_name(&self) -> Option<&str> { self.assignee_name.as_deref() }
    /// Username of the assignee
    pub fn assignee_username(&self) -> Option<&str> { self.assignee.as_deref() }
    pub fn creator(&self) -> Option<&str>      { self.creator.as_deref() }
    pub fn created_at(&self) -> Option<NaiveDate> { self.created_at }
    pub fn is_overdue(&self) -> bool           { self.is_overdue }
    pub fn completed(&self) -> bool            { self.status.is_completed() }

    pub fn display_status(&self) -> DisplayStatus {
        if self.is_overdue {
            return DisplayStatus::Overdue;
        }
        match self.status {
            TaskStatus::Pending => DisplayStatus::Pending,
            TaskStatus::Completed => DisplayStatus::Completed,
        }
    }

    /// Apply an accepted update. Used by in-memory backends
    pub fn apply(&mut self, update: &TaskUpdate) {
        self.title = update.draft.title.clone();
        self.description = Some(update.draft.description.clone()).filter(|d| !d.is_empty());
        self.due_date = update.draft.due_date;
        self.priority = update.draft.priority;
        self.assignee_id = Some(update.draft.assignee_id);
        self.status = update.status;
        if update.status.is_completed() {
            self.is_overdue = false;
        }
    }

    pub fn set_assignee_name(&mut self, name: Option<String>) {
        self.assignee_name = name;
    }

    pub fn set_completed(&mut self) {
        self.status = TaskStatus::Completed;
        self.is_overdue = false;
    }
}

/// The body of a `POST /api/tasks` request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    #[serde(with = "crate::utils::day_format")]
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub assignee_id: UserId,
}

/// The body of a `PUT /api/tasks/{id}` request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskUpdate {
    #[serde(flatten)]
    pub draft: TaskDraft,
    pub status: TaskStatus,
}

/// What the backend answers to a mutation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationAck {
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationAck {
    pub fn message<S: ToString>(message: S) -> Self {
        Self { message: Some(message.to_string()), ..Self::default() }
    }
}

/// The raw content of the add/edit task form.
///
/// Every field may be left empty; [`TaskForm::to_draft`] and [`TaskForm::to_update`] check the required ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub assignee_id: Option<UserId>,
    pub status: Option<TaskStatus>,
}

impl TaskForm {
    /// Pre-fill the edit form from an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: Some(task.due_date),
            priority: task.priority,
            assignee_id: task.assignee_id,
            status: Some(task.status),
        }
    }

    /// Validate the fields required to create a task: title, due date and assignee
    pub fn to_draft(&self) -> Result<TaskDraft> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.due_date.is_none() {
            missing.push("due_date");
        }
        if self.assignee_id.is_none() {
            missing.push("assignee_id");
        }

        match (self.due_date, self.assignee_id) {
            (Some(due_date), Some(assignee_id)) if missing.is_empty() => Ok(TaskDraft {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                due_date,
                priority: self.priority,
                assignee_id,
            }),
            _ => Err(Error::MissingFields(missing)),
        }
    }

    /// Validate the fields required to update a task: the ones of [`Self::to_draft`], plus the status
    pub fn to_update(&self) -> Result<TaskUpdate> {
        let draft = self.to_draft();
        match (draft, self.status) {
            (Ok(draft), Some(status)) => Ok(TaskUpdate { draft, status }),
            (Ok(_), None) => Err(Error::MissingFields(vec!["status"])),
            (Err(Error::MissingFields(mut missing)), status) => {
                if status.is_none() {
                    missing.push("status");
                }
                Err(Error::MissingFields(missing))
            },
            (Err(err), _) => Err(err),
        }
    }
}
