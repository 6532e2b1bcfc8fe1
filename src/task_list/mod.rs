//! The task list: a pure render step (this module) and a stateful [`manager`]
//!
//! [`render`] turns the fetched tasks and the [`TaskViewState`] into a [`TaskListView`], that a UI only has to draw.

pub mod manager;
pub use manager::{Modal, TaskListManager};

use chrono::NaiveDate;

use crate::filter::{Role, TaskViewState};
use crate::pagination::{clamp_page, page_count, page_slice, Pagination, PAGE_SIZE};
use crate::sort::sort_tasks;
use crate::task::{DisplayStatus, Priority, Task, TaskId};
use crate::utils::{capitalize, due_label};

/// What the task list area shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskListView {
    /// The last fetch failed. Neither rows nor empty states are shown
    Unavailable,
    /// There are no tasks at all
    NoTasks,
    /// There are tasks, but none matches the active filters
    NoResults,
    /// One page of rows
    Page(TaskPage),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskPage {
    pub rows: Vec<TaskRow>,
    /// `None` when everything fits in a single page
    pub pagination: Option<Pagination>,
    /// The page actually shown, after clamping
    pub page: usize,
    /// Number of tasks across all pages
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub due_label: String,
    pub assignee: String,
    pub priority: Priority,
    pub priority_label: String,
    pub status: DisplayStatus,
    pub status_label: String,
    /// Only members get a "complete" button
    pub complete_action: Option<CompleteAction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompleteAction {
    pub enabled: bool,
    pub label: &'static str,
}

impl TaskRow {
    pub fn new(task: &Task, role: Role, today: NaiveDate) -> Self {
        let status = task.display_status();
        let complete_action = match role {
            Role::Admin => None,
            Role::Member if task.completed() => Some(CompleteAction { enabled: false, label: "Completed" }),
            Role::Member => Some(CompleteAction { enabled: true, label: "Mark Complete" }),
        };

        Self {
            id: task.id(),
            title: task.title().to_string(),
            due_label: due_label(task.due_date(), today),
            assignee: task.assignee_name().unwrap_or("Unassigned").to_string(),
            priority: task.priority(),
            priority_label: task.priority().label(),
            status,
            status_label: status.label(),
            complete_action,
        }
    }
}

/// The read-only detail view members get when opening a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDetail {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_label: String,
    pub creator: String,
    pub priority_label: String,
    pub status_label: String,
    /// The "mark as completed" checkbox is disabled once the task is completed
    pub can_complete: bool,
}

impl TaskDetail {
    pub fn new(task: &Task, today: NaiveDate) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description()
                .filter(|d| !d.is_empty())
                .unwrap_or("No description provided")
                .to_string(),
            due_label: due_label(task.due_date(), today),
            creator: task.creator().unwrap_or("Administrator").to_string(),
            priority_label: task.priority().label(),
            status_label: capitalize(task.display_status().as_str()),
            can_complete: !task.completed(),
        }
    }
}

/// Sort, paginate and render `tasks`, as fetched with `state.filter`
pub fn render(tasks: &[Task], state: &TaskViewState, role: Role, today: NaiveDate) -> TaskListView {
    if tasks.is_empty() {
        if state.filter.is_active() {
            return TaskListView::NoResults;
        }
        return TaskListView::NoTasks;
    }

    let sorted = sort_tasks(tasks, &state.sort);
    let total_pages = page_count(sorted.len(), PAGE_SIZE);
    let page = clamp_page(state.page, total_pages);

    let rows = page_slice(&sorted, page, PAGE_SIZE)
        .iter()
        .map(|task| TaskRow::new(task, role, today))
        .collect();

    TaskListView::Page(TaskPage {
        rows,
        pagination: Pagination::new(page, total_pages),
        page,
        total: sorted.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TaskFilter;
    use crate::sort::{SortDirection, SortKey, SortOrder};
    use crate::task::TaskStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn many(n: u64) -> Vec<Task> {
        (1..=n)
            .map(|i| Task::new(i, format!("Task {}", i), today() + chrono::Duration::days(i as i64), Priority::Medium))
            .collect()
    }

    #[test]
    fn empty_states_are_exclusive() {
        let state = TaskViewState::default();
        assert_eq!(render(&[], &state, Role::Admin, today()), TaskListView::NoTasks);

        let filtered = TaskViewState {
            filter: TaskFilter { priority: Some(Priority::High), ..TaskFilter::default() },
            ..TaskViewState::default()
        };
        assert_eq!(render(&[], &filtered, Role::Admin, today()), TaskListView::NoResults);
    }

    #[test]
    fn only_the_current_page_is_rendered() {
        let tasks = many(23);
        let state = TaskViewState { page: 3, ..TaskViewState::default() };
        let page = match render(&tasks, &state, Role::Admin, today()) {
            TaskListView::Page(page) => page,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(page.page, 3);
        assert_eq!(page.total, 23);
        assert_eq!(page.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![21, 22, 23]);
        let pagination = page.pagination.unwrap();
        assert_eq!(pagination.page_numbers(), vec![1, 2, 3]);
        assert!(pagination.next.disabled);
    }

    #[test]
    fn out_of_range_page_resets_to_first() {
        let tasks = many(5);
        let state = TaskViewState {
            page: 4,
            sort: SortOrder::new(SortKey::DueDate, SortDirection::Descending),
            ..TaskViewState::default()
        };
        match render(&tasks, &state, Role::Member, today()) {
            TaskListView::Page(page) => {
                assert_eq!(page.page, 1);
                assert_eq!(page.pagination, None);
                assert_eq!(page.rows[0].id, 5);
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rows() {
        let overdue = Task::new(1, "Report", today() - chrono::Duration::days(2), Priority::High)
            .with_assignee(2, "Jane Smith")
            .with_overdue(true);
        let row = TaskRow::new(&overdue, Role::Member, today());
        assert_eq!(row.status_label, "Overdue");
        assert_eq!(row.priority_label, "High");
        assert_eq!(row.due_label, "Jun 13, 2024");
        assert_eq!(row.assignee, "Jane Smith");
        assert_eq!(row.complete_action, Some(CompleteAction { enabled: true, label: "Mark Complete" }));

        let done = Task::new(2, "Slides", today(), Priority::Low).with_status(TaskStatus::Completed);
        let row = TaskRow::new(&done, Role::Member, today());
        assert_eq!(row.due_label, "Today");
        assert_eq!(row.assignee, "Unassigned");
        assert_eq!(row.complete_action, Some(CompleteAction { enabled: false, label: "Completed" }));
        assert_eq!(TaskRow::new(&done, Role::Admin, today()).complete_action, None);
    }

    #[test]
    fn detail_fallbacks() {
        let task = Task::new(1, "Report", today(), Priority::Medium);
        let detail = TaskDetail::new(&task, today());
        assert_eq!(detail.description, "No description provided");
        assert_eq!(detail.creator, "Administrator");
        assert_eq!(detail.status_label, "Pending");
        assert!(detail.can_complete);
    }
}
