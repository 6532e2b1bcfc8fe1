//! Server-side filters of the task list, and the view state of the list

use crate::sort::SortOrder;
use crate::task::{Priority, TaskStatus};

/// Who is looking at the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Can create, edit, delete and assign any task
    Admin,
    /// Sees the tasks assigned to them and can only mark them as completed
    Member,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// The filter bar of the task list. `None` (or an empty query) means "all"
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub search: String,
    /// Only honoured for administrators
    pub department: Option<String>,
}

impl TaskFilter {
    /// Whether any dimension is constrained, which decides between the "no tasks" and "no results" empty states
    pub fn is_active(&self) -> bool {
        self.status.is_some()
            || self.priority.is_some()
            || !self.search.trim().is_empty()
            || self.department_constraint().is_some()
    }

    /// The "clear filters" button
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn department_constraint(&self) -> Option<&str> {
        self.department
            .as_deref()
            .filter(|d| !d.is_empty() && *d != "all")
    }

    /// The query string of `GET /api/tasks`.
    ///
    /// `status` and `priority` are always sent (`all` when unconstrained), `q` only when non-empty,
    /// `department` only for administrators.
    pub fn query_pairs(&self, role: Role) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("status", self.status.map(|s| s.as_str()).unwrap_or("all").to_string()),
            ("priority", self.priority.map(|p| p.as_str()).unwrap_or("all").to_string()),
        ];

        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("q", search.to_string()));
        }

        if role.is_admin() {
            if let Some(department) = self.department_constraint() {
                pairs.push(("department", department.to_string()));
            }
        }
        pairs
    }
}

/// Everything the task list shows that is not backend data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskViewState {
    pub filter: TaskFilter,
    pub sort: SortOrder,
    /// 1-based
    pub page: usize,
}

impl Default for TaskViewState {
    fn default() -> Self {
        Self {
            filter: TaskFilter::default(),
            sort: SortOrder::default(),
            page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_inactive() {
        let filter = TaskFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.query_pairs(Role::Admin), vec![
            ("status", "all".to_string()),
            ("priority", "all".to_string()),
        ]);

        let blank = TaskFilter { search: "   ".into(), department: Some("all".into()), ..TaskFilter::default() };
        assert!(!blank.is_active());
    }

    #[test]
    fn department_is_only_sent_for_admins() {
        let filter = TaskFilter {
            status: Some(TaskStatus::Pending),
            priority: None,
            search: " report ".into(),
            department: Some("Sales".into()),
        };
        assert!(filter.is_active());
        assert_eq!(filter.query_pairs(Role::Admin), vec![
            ("status", "pending".to_string()),
            ("priority", "all".to_string()),
            ("q", "report".to_string()),
            ("department", "Sales".to_string()),
        ]);
        assert_eq!(filter.query_pairs(Role::Member).len(), 3);
    }

    #[test]
    fn clearing() {
        let mut filter = TaskFilter { priority: Some(Priority::High), ..TaskFilter::default() };
        assert!(filter.is_active());
        filter.clear();
        assert_eq!(filter, TaskFilter::default());
    }
}
