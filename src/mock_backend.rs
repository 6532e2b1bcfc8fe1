//! An in-memory [`TaskBackend`], that behaves like the server.
//!
//! It records every request it receives, and can be told to fail some of them with a [`MockBehaviour`].

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::event::{Event, EventCategory};
use crate::filter::{Role, TaskFilter};
use crate::mock_behaviour::MockBehaviour;
use crate::task::{MutationAck, Priority, Task, TaskDraft, TaskId, TaskStatus, TaskUpdate};
use crate::traits::TaskBackend;
use crate::user::{Department, User, UserId};
use crate::utils::DateRange;

/// A request received by a [`MockBackend`]
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    GetTasks(Vec<(&'static str, String)>),
    GetUsers,
    GetDepartments,
    CreateTask(TaskDraft),
    UpdateTask(TaskId, TaskUpdate),
    DeleteTask(TaskId),
    CompleteTask(TaskId),
    GetEvents(DateRange),
}

impl Request {
    /// Whether this request changes data on the backend
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::CreateTask(_) | Request::UpdateTask(_, _) | Request::DeleteTask(_) | Request::CompleteTask(_)
        )
    }
}

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    events: Vec<Event>,
    users: Vec<User>,
    departments: Vec<Department>,
    requests: Vec<Request>,
    behaviour: MockBehaviour,
}

#[derive(Debug)]
pub struct MockBackend {
    state: Mutex<State>,
    /// The day the backend uses to flag overdue tasks
    today: NaiveDate,
    /// For members, only the tasks assigned to this user are visible
    current_user: Option<UserId>,
}

impl MockBackend {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: Mutex::new(State::default()),
            today,
            current_user: None,
        }
    }

    /// A backend populated with a handful of users, tasks and events around `today`
    pub fn sample(today: NaiveDate) -> Self {
        let backend = Self::new(today).as_user(2);
        let first = crate::utils::first_day_of_month(today);
        let day = |n: i64| first + Duration::days(n - 1);

        backend.add_department(Department { id: 1, name: "Engineering".into() });
        backend.add_department(Department { id: 2, name: "Marketing".into() });
        backend.add_user(user(1, "admin", Some("Administrator"), None, true));
        backend.add_user(user(2, "jdoe", Some("John Doe"), Some("Engineering"), true));
        backend.add_user(user(3, "jsmith", Some("Jane Smith"), Some("Marketing"), true));
        backend.add_user(user(4, "mjohnson", Some("Mike Johnson"), Some("Engineering"), false));

        backend.add_task(Task::new(1, "Complete project proposal", day(15), Priority::High)
            .with_description("Finish the draft and send for review")
            .with_assignee(2, "John Doe")
            .with_creator("admin"));
        backend.add_task(Task::new(2, "Team meeting", day(10), Priority::Medium)
            .with_description("Weekly progress update")
            .with_assignee(3, "Jane Smith")
            .with_creator("admin"));
        backend.add_task(Task::new(3, "Review code changes", day(5), Priority::Low)
            .with_description("Check pull requests and provide feedback")
            .with_assignee(2, "John Doe")
            .with_creator("admin")
            .with_status(TaskStatus::Completed));

        backend.add_event(Event::new(1, "Company Meeting", day(20), EventCategory::Meeting)
            .with_description("Annual company-wide meeting"));
        backend.add_event(Event::new(2, "Project Deadline", day(28), EventCategory::Deadline)
            .with_description("Final submission deadline for Q2 project"));
        backend.add_event(Event::new(3, "Company Holiday", day(25), EventCategory::Holiday)
            .with_description("Office closed for holiday"));
        backend
    }

    /// Act on behalf of a given user: members will only see the tasks assigned to them
    pub fn as_user(mut self, user_id: UserId) -> Self {
        self.current_user = Some(user_id);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_task(&self, task: Task) {
        self.state().tasks.push(task);
    }
    pub fn add_event(&self, event: Event) {
        self.state().events.push(event);
    }
    pub fn add_user(&self, user: User) {
        self.state().users.push(user);
    }
    pub fn add_department(&self, department: Department) {
        self.state().departments.push(department);
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        self.state().behaviour = behaviour;
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<Request> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    /// The current content of the backend, without recording a request
    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    /// Same flag as the server: still pending, and due before today
    fn with_overdue_flag(&self, task: &Task) -> Task {
        let overdue = task.status() == TaskStatus::Pending && task.due_date() < self.today;
        task.clone().with_overdue(overdue)
    }
}

fn user(id: UserId, username: &str, full_name: Option<&str>, department: Option<&str>, is_active: bool) -> User {
    User {
        id,
        username: username.to_string(),
        full_name: full_name.map(String::from),
        department: department.map(String::from),
        is_active,
        is_admin: id == 1,
    }
}

fn not_found(path: String) -> Error {
    Error::Status { status: StatusCode::NOT_FOUND, url: path }
}

fn matches_filter(task: &Task, filter: &TaskFilter, role: Role, users: &[User], current_user: Option<UserId>) -> bool {
    if let (Role::Member, Some(me)) = (role, current_user) {
        if task.assignee_id() != Some(me) {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if task.status() != status {
            return false;
        }
    }
    if let Some(priority) = filter.priority {
        if task.priority() != priority {
            return false;
        }
    }

    let search = filter.search.trim().to_lowercase();
    if !search.is_empty() {
        let in_title = task.title().to_lowercase().contains(&search);
        let in_description = task.description().map(|d| d.to_lowercase().contains(&search)).unwrap_or(false);
        if !in_title && !in_description {
            return false;
        }
    }

    if role.is_admin() {
        if let Some(department) = filter.department.as_deref().filter(|d| !d.is_empty() && *d != "all") {
            let in_department = users.iter().any(|user| {
                Some(user.id) == task.assignee_id() && user.department.as_deref() == Some(department)
            });
            if !in_department {
                return false;
            }
        }
    }
    true
}

#[async_trait]
impl TaskBackend for MockBackend {
    async fn get_tasks(&self, filter: &TaskFilter, role: Role) -> Result<Vec<Task>> {
        let mut state = self.state();
        state.requests.push(Request::GetTasks(filter.query_pairs(role)));
        state.behaviour.can_get_tasks()?;

        let mut tasks: Vec<Task> = state.tasks.iter()
            .filter(|task| matches_filter(task, filter, role, &state.users, self.current_user))
            .map(|task| self.with_overdue_flag(task))
            .collect();
        tasks.sort_by_key(|task| task.due_date());
        Ok(tasks)
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        let mut state = self.state();
        state.requests.push(Request::GetUsers);
        state.behaviour.can_get_users()?;
        Ok(state.users.clone())
    }

    async fn get_departments(&self) -> Result<Vec<Department>> {
        let mut state = self.state();
        state.requests.push(Request::GetDepartments);
        state.behaviour.can_get_departments()?;
        Ok(state.departments.clone())
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<MutationAck> {
        let mut state = self.state();
        state.requests.push(Request::CreateTask(draft.clone()));
        state.behaviour.can_create_task()?;

        let id = state.tasks.iter().map(|t| t.id()).max().unwrap_or(0) + 1;
        let assignee_name = state.users.iter()
            .find(|u| u.id == draft.assignee_id)
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| String::from("Unassigned"));
        let mut task = Task::new(id, &draft.title, draft.due_date, draft.priority)
            .with_assignee(draft.assignee_id, assignee_name);
        if !draft.description.is_empty() {
            task = task.with_description(&draft.description);
        }
        state.tasks.push(task);

        Ok(MutationAck {
            id: Some(id),
            title: Some(draft.title.clone()),
            status: Some(TaskStatus::Pending),
            message: Some(String::from("Task created successfully")),
        })
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<MutationAck> {
        let mut state = self.state();
        state.requests.push(Request::UpdateTask(id, update.clone()));
        state.behaviour.can_update_task()?;

        let assignee_name = state.users.iter()
            .find(|u| u.id == update.draft.assignee_id)
            .map(|u| u.display_name().to_string());
        let task = state.tasks.iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| not_found(format!("/api/tasks/{}", id)))?;
        task.apply(update);
        task.set_assignee_name(assignee_name);

        Ok(MutationAck {
            id: Some(id),
            title: Some(task.title().to_string()),
            status: Some(task.status()),
            message: Some(String::from("Task updated successfully")),
        })
    }

    async fn delete_task(&self, id: TaskId) -> Result<MutationAck> {
        let mut state = self.state();
        state.requests.push(Request::DeleteTask(id));
        state.behaviour.can_delete_task()?;

        let before = state.tasks.len();
        state.tasks.retain(|t| t.id() != id);
        if state.tasks.len() == before {
            return Err(not_found(format!("/api/tasks/{}", id)));
        }
        Ok(MutationAck::message("Task deleted successfully"))
    }

    async fn complete_task(&self, id: TaskId) -> Result<MutationAck> {
        let mut state = self.state();
        state.requests.push(Request::CompleteTask(id));
        state.behaviour.can_complete_task()?;

        let task = state.tasks.iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| not_found(format!("/api/tasks/{}/complete", id)))?;
        task.set_completed();
        Ok(MutationAck {
            id: Some(id),
            status: Some(TaskStatus::Completed),
            message: Some(String::from("Task marked as completed")),
            ..MutationAck::default()
        })
    }

    async fn get_events(&self, range: DateRange) -> Result<Vec<Event>> {
        let mut state = self.state();
        state.requests.push(Request::GetEvents(range));
        state.behaviour.can_get_events()?;
        Ok(state.events.iter()
            .filter(|event| range.contains(event.date()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 18).unwrap()
    }

    #[tokio::test]
    async fn filters_like_the_server() {
        let backend = MockBackend::sample(today());

        let all = backend.get_tasks(&TaskFilter::default(), Role::Admin).await.unwrap();
        assert_eq!(all.iter().map(|t| t.id()).collect::<Vec<_>>(), vec![3, 2, 1]);
        // Due on the 10th, still pending
        assert!(all[1].is_overdue());
        assert!(!all[0].is_overdue());

        let mine = backend.get_tasks(&TaskFilter::default(), Role::Member).await.unwrap();
        assert!(mine.iter().all(|t| t.assignee_id() == Some(2)));

        let marketing = TaskFilter { department: Some("Marketing".into()), ..TaskFilter::default() };
        let tasks = backend.get_tasks(&marketing, Role::Admin).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title(), "Team meeting");

        let search = TaskFilter { search: "PULL REQ".into(), ..TaskFilter::default() };
        let tasks = backend.get_tasks(&search, Role::Admin).await.unwrap();
        assert_eq!(tasks.len(), 1);

        assert_eq!(backend.requests().len(), 4);
    }

    #[tokio::test]
    async fn mocked_failures_are_still_recorded() {
        let backend = MockBackend::new(today());
        backend.set_behaviour(MockBehaviour::fail_now(1));
        assert!(backend.delete_task(4).await.is_err());
        assert!(matches!(backend.delete_task(4).await, Err(Error::Status { .. })));
        assert_eq!(backend.requests(), vec![Request::DeleteTask(4), Request::DeleteTask(4)]);
    }

    #[tokio::test]
    async fn events_within_range() {
        let backend = MockBackend::sample(today());
        let june = backend.get_events(DateRange::month_of(today())).await.unwrap();
        assert_eq!(june.len(), 3);
        let july = backend.get_events(DateRange::month_of(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())).await.unwrap();
        assert!(july.is_empty());
    }
}
