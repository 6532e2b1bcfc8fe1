//! Client-side ordering of the task list

use std::cmp::Ordering;

use crate::task::Task;
use crate::utils::comparison::{compare_due_date, compare_priority, compare_text_alpha};

/// A free-text column a task list can be sorted on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Description,
    AssigneeName,
    Status,
    Creator,
}

impl TextField {
    fn get<'a>(&self, task: &'a Task) -> Option<&'a str> {
        match self {
            TextField::Title => Some(task.title()),
            TextField::Description => task.description(),
            TextField::AssigneeName => task.assignee_name(),
            TextField::Status => Some(task.status().as_str()),
            TextField::Creator => task.creator(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    DueDate,
    Priority,
    Text(TextField),
}

impl SortKey {
    /// Parse the `data-sort` names used by the sort menu (`due_date`, `priority`, `title`...)
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "due_date" => SortKey::DueDate,
            "priority" => SortKey::Priority,
            "title" => SortKey::Text(TextField::Title),
            "description" => SortKey::Text(TextField::Description),
            "assignee_name" => SortKey::Text(TextField::AssigneeName),
            "status" => SortKey::Text(TextField::Status),
            "creator" => SortKey::Text(TextField::Creator),
            _ => return None,
        };
        Some(key)
    }

    fn compare(&self, left: &Task, right: &Task) -> Ordering {
        match self {
            SortKey::DueDate => compare_due_date(left, right),
            SortKey::Priority => compare_priority(left, right),
            SortKey::Text(field) => compare_text_alpha(field.get(left), field.get(right)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The current sort key and direction of the task list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self { key: SortKey::DueDate, direction: SortDirection::Ascending }
    }
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// What happens when the user picks `key` in the sort menu:
    /// the same key twice in a row toggles the direction, a new key starts ascending
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.reversed();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Total order between two tasks. Ties on the key are broken by task id
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let ascending = self.key.compare(left, right)
            .then_with(|| left.id().cmp(&right.id()));
        match self.direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }
}

/// Returns a sorted copy of `tasks`
pub fn sort_tasks(tasks: &[Task], order: &SortOrder) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|left, right| order.compare(left, right));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use proptest::prelude::*;

    use crate::task::Priority;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            Task::new(1, "beta", day(12), Priority::Low),
            Task::new(2, "Alpha", day(3), Priority::High),
            Task::new(3, "gamma", day(20), Priority::Medium).with_assignee(1, "Zoe"),
            Task::new(4, "alpha", day(3), Priority::Medium).with_assignee(2, "adam"),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id()).collect()
    }

    #[test]
    fn by_due_date() {
        let sorted = sort_tasks(&sample(), &SortOrder::default());
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
    }

    #[test]
    fn by_priority() {
        let order = SortOrder::new(SortKey::Priority, SortDirection::Descending);
        assert_eq!(ids(&sort_tasks(&sample(), &order)), vec![2, 4, 3, 1]);
    }

    #[test]
    fn by_text_field_ignores_case() {
        let order = SortOrder::new(SortKey::Text(TextField::Title), SortDirection::Ascending);
        assert_eq!(ids(&sort_tasks(&sample(), &order)), vec![2, 4, 1, 3]);

        // Unassigned tasks sort first
        let order = SortOrder::new(SortKey::Text(TextField::AssigneeName), SortDirection::Ascending);
        assert_eq!(ids(&sort_tasks(&sample(), &order)), vec![1, 2, 4, 3]);
    }

    #[test]
    fn input_is_left_untouched() {
        let tasks = sample();
        let _ = sort_tasks(&tasks, &SortOrder::new(SortKey::Priority, SortDirection::Ascending));
        assert_eq!(ids(&tasks), vec![1, 2, 3, 4]);
    }

    #[test]
    fn selecting_keys() {
        let mut order = SortOrder::default();
        order.select(SortKey::DueDate);
        assert_eq!(order.direction, SortDirection::Descending);
        order.select(SortKey::DueDate);
        assert_eq!(order.direction, SortDirection::Ascending);
        order.select(SortKey::DueDate);
        order.select(SortKey::Priority);
        assert_eq!(order, SortOrder::new(SortKey::Priority, SortDirection::Ascending));

        assert_eq!(SortKey::from_name("assignee_name"), Some(SortKey::Text(TextField::AssigneeName)));
        assert_eq!(SortKey::from_name("nope"), None);
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((1u32..29, 0usize..3, "[a-zA-Z]{0,6}"), 0..40).prop_map(|rows| {
            rows
                .into_iter()
                .enumerate()
                .map(|(i, (d, p, title))| {
                    let priority = [Priority::Low, Priority::Medium, Priority::High][p];
                    Task::new(i as u64, title, day(d), priority)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn descending_is_reversed_ascending(tasks in arb_tasks(), key_index in 0usize..3) {
            let key = [SortKey::DueDate, SortKey::Priority, SortKey::Text(TextField::Title)][key_index];
            let ascending = sort_tasks(&tasks, &SortOrder::new(key, SortDirection::Ascending));
            let mut descending = sort_tasks(&tasks, &SortOrder::new(key, SortDirection::Descending));
            descending.reverse();
            prop_assert_eq!(&ascending, &descending);

            let mut expected = ids(&tasks);
            let mut got = ids(&ascending);
            expected.sort_unstable();
            got.sort_unstable();
            prop_assert_eq!(expected, got);
        }
    }
}
