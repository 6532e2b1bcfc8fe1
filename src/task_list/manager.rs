//! The stateful side of the task list: fetches, mutations, modals and notifications

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::filter::{Role, TaskFilter, TaskViewState};
use crate::notification::Notification;
use crate::pagination::{clamp_page, page_count, PAGE_SIZE};
use crate::progress::{FeedbackSender, LoadProgress};
use crate::sort::SortKey;
use crate::task::{Task, TaskForm, TaskId};
use crate::traits::{Notifier, TaskBackend};
use crate::user::{assignee_options, AssigneeOption, Department, User};

use super::{render, TaskDetail, TaskListView};

/// The modal dialog currently shown over the task list
#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    None,
    AddTask,
    EditTask { task_id: TaskId, form: TaskForm },
    /// Read-only details, for members
    ViewTask(TaskId),
    /// The first step of a deletion
    ConfirmDelete { task_id: TaskId, title: String },
    /// Shown after a member completed a task
    Completion,
}

impl Default for Modal {
    fn default() -> Self {
        Modal::None
    }
}

/// Owns the page-scoped copy of the tasks, and every user action on the task list.
///
/// The collection is replaced as a whole on every reload, and is never patched locally.
pub struct TaskListManager<B, N>
where
    B: TaskBackend,
    N: Notifier,
{
    backend: B,
    notifier: N,
    role: Role,

    state: TaskViewState,
    tasks: Vec<Task>,
    /// Set when the last fetch failed. The list is then shown as unavailable
    load_failed: bool,
    users: Vec<User>,
    departments: Vec<Department>,

    progress: LoadProgress,
    modal: Modal,
}

impl<B, N> TaskListManager<B, N>
where
    B: TaskBackend,
    N: Notifier,
{
    pub fn new(backend: B, notifier: N, role: Role) -> Self {
        Self {
            backend,
            notifier,
            role,
            state: TaskViewState::default(),
            tasks: Vec::new(),
            load_failed: false,
            users: Vec::new(),
            departments: Vec::new(),
            progress: LoadProgress::new(),
            modal: Modal::None,
        }
    }

    /// Same as [`Self::new`], but the loading indicator is also reported to `feedback`
    pub fn with_feedback_channel(backend: B, notifier: N, role: Role, feedback: FeedbackSender) -> Self {
        let mut manager = Self::new(backend, notifier, role);
        manager.progress = LoadProgress::new_with_feedback_channel(feedback);
        manager
    }

    pub fn backend(&self) -> &B                   { &self.backend }
    pub fn notifier(&self) -> &N                  { &self.notifier }
    pub fn role(&self) -> Role                    { self.role }
    pub fn modal(&self) -> &Modal                 { &self.modal }
    pub fn tasks(&self) -> &[Task]                { &self.tasks }
    pub fn view_state(&self) -> &TaskViewState    { &self.state }
    pub fn departments(&self) -> &[Department]    { &self.departments }
    pub fn is_loading(&self) -> bool              { self.progress.is_loading() }

    /// Give the backend back, e.g. to share it with a [`CalendarManager`](crate::calendar::CalendarManager)
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Fetch the tasks matching the current filter, and replace the local copy with them
    pub async fn load_tasks(&mut self) -> Result<()> {
        self.progress.start("tasks");
        match self.backend.get_tasks(&self.state.filter, self.role).await {
            Ok(tasks) => {
                self.progress.finish("tasks", tasks.len());
                self.tasks = tasks;
                self.load_failed = false;
                let total_pages = page_count(self.tasks.len(), PAGE_SIZE);
                self.state.page = clamp_page(self.state.page, total_pages);
                Ok(())
            },
            Err(err) => {
                self.progress.fail("tasks", &err);
                self.load_failed = true;
                self.notifier.notify(Notification::danger("Failed to load tasks. Please try again later."));
                Err(err)
            },
        }
    }

    /// Change the filter, go back to the first page and reload
    pub async fn set_filter(&mut self, filter: TaskFilter) -> Result<()> {
        self.state.filter = filter;
        self.state.page = 1;
        self.load_tasks().await
    }

    pub async fn clear_filters(&mut self) -> Result<()> {
        self.state.filter.clear();
        self.state.page = 1;
        self.load_tasks().await
    }

    /// Click on a sort header. This only re-renders: no request is sent
    pub fn sort_by(&mut self, key: SortKey) {
        self.state.sort.select(key);
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total_pages = page_count(self.tasks.len(), PAGE_SIZE);
        self.state.page = clamp_page(page, total_pages);
    }

    /// What the task list currently shows
    pub fn view(&self, today: NaiveDate) -> TaskListView {
        if self.load_failed {
            return TaskListView::Unavailable;
        }
        render(&self.tasks, &self.state, self.role, today)
    }

    /// Fetch the users that tasks can be assigned to. Administrators only
    pub async fn load_users(&mut self) -> Result<()> {
        self.require_admin("load users")?;
        match self.backend.get_users().await {
            Ok(users) => {
                log::info!("Loaded {} users", users.len());
                self.users = users;
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to load users: {}", err);
                self.notifier.notify(Notification::danger("Failed to load users. Please refresh the page."));
                Err(err)
            },
        }
    }

    /// The entries of the assignee dropdown
    pub fn assignee_options(&self) -> Vec<AssigneeOption> {
        assignee_options(&self.users)
    }

    /// Fetch the departments of the department filter. Administrators only
    pub async fn load_departments(&mut self) -> Result<()> {
        self.require_admin("load departments")?;
        match self.backend.get_departments().await {
            Ok(departments) => {
                log::info!("Loaded {} departments", departments.len());
                self.departments = departments;
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to load departments: {}", err);
                self.notifier.notify(Notification::danger("Failed to load departments. Please refresh the page."));
                Err(err)
            },
        }
    }

    pub fn open_add_task(&mut self) -> Result<()> {
        self.require_admin("create tasks")?;
        self.modal = Modal::AddTask;
        Ok(())
    }

    /// Open a task: administrators get the edit form, members the read-only details
    pub fn open_task(&mut self, task_id: TaskId) -> Result<()> {
        let task = self.find_task(task_id)?;
        self.modal = match self.role {
            Role::Admin => Modal::EditTask { task_id, form: TaskForm::from_task(task) },
            Role::Member => Modal::ViewTask(task_id),
        };
        Ok(())
    }

    pub fn task_detail(&self, task_id: TaskId, today: NaiveDate) -> Result<TaskDetail> {
        self.find_task(task_id).map(|task| TaskDetail::new(task, today))
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    /// Submit the "add task" form.
    ///
    /// Nothing is sent when a required field is missing.
    pub async fn create_task(&mut self, form: &TaskForm) -> Result<()> {
        self.require_admin("create tasks")?;
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(err) => return Err(self.reject(err)),
        };

        match self.backend.create_task(&draft).await {
            Ok(ack) => {
                log::info!("Created task {:?} ({})", ack.id, draft.title);
                self.after_mutation("Task created successfully!").await;
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to create task: {}", err);
                self.notifier.notify(Notification::danger("Failed to create task. Please try again."));
                Err(err)
            },
        }
    }

    /// Submit the "edit task" form
    pub async fn update_task(&mut self, task_id: TaskId, form: &TaskForm) -> Result<()> {
        self.require_admin("edit tasks")?;
        let update = match form.to_update() {
            Ok(update) => update,
            Err(err) => return Err(self.reject(err)),
        };

        match self.backend.update_task(task_id, &update).await {
            Ok(_) => {
                log::info!("Updated task {}", task_id);
                self.after_mutation("Task updated successfully!").await;
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to update task {}: {}", task_id, err);
                self.notifier.notify(Notification::danger("Failed to update task. Please try again."));
                Err(err)
            },
        }
    }

    /// First step of a deletion: ask for a confirmation
    pub fn request_delete(&mut self, task_id: TaskId) -> Result<()> {
        self.require_admin("delete tasks")?;
        let title = self.find_task(task_id)?.title().to_string();
        self.modal = Modal::ConfirmDelete { task_id, title };
        Ok(())
    }

    /// Second step of a deletion
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let task_id = match &self.modal {
            Modal::ConfirmDelete { task_id, .. } => *task_id,
            _ => return Err(Error::NothingToConfirm),
        };

        match self.backend.delete_task(task_id).await {
            Ok(_) => {
                log::info!("Deleted task {}", task_id);
                self.after_mutation("Task deleted successfully!").await;
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to delete task {}: {}", task_id, err);
                self.notifier.notify(Notification::danger("Failed to delete task. Please try again."));
                Err(err)
            },
        }
    }

    /// A member marks one of their tasks as completed. There is no way back
    pub async fn mark_complete(&mut self, task_id: TaskId) -> Result<()> {
        if self.role.is_admin() {
            return Err(Error::Forbidden("mark tasks as completed"));
        }
        if self.find_task(task_id)?.completed() {
            self.notifier.notify(Notification::info("This task is already completed."));
            return Err(Error::AlreadyCompleted(task_id));
        }

        match self.backend.complete_task(task_id).await {
            Ok(_) => {
                log::info!("Task {} marked as completed", task_id);
                self.modal = Modal::Completion;
                // A failed reload has already been notified
                let _ = self.load_tasks().await;
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to complete task {}: {}", task_id, err);
                self.notifier.notify(Notification::danger("Failed to mark task as completed. Please try again."));
                Err(err)
            },
        }
    }

    async fn after_mutation(&mut self, message: &str) {
        self.modal = Modal::None;
        self.notifier.notify(Notification::success(message));
        // A failed reload has already been notified
        let _ = self.load_tasks().await;
    }

    /// Report a client-side validation failure
    fn reject(&mut self, err: Error) -> Error {
        log::debug!("Form rejected: {}", err);
        self.notifier.notify(Notification::warning("Please fill in all required fields."));
        err
    }

    fn require_admin(&self, action: &'static str) -> Result<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Member => Err(Error::Forbidden(action)),
        }
    }

    /// Only the tasks currently shown can be acted upon: none of them after a failed load
    fn find_task(&self, task_id: TaskId) -> Result<&Task> {
        if self.load_failed {
            return Err(Error::UnknownTask(task_id));
        }
        self.tasks
            .iter()
            .find(|task| task.id() == task_id)
            .ok_or(Error::UnknownTask(task_id))
    }
}
