//! Calendar items (tasks and events), as displayed in a day cell

use chrono::NaiveDate;

use crate::event::Event;
use crate::task::Task;

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Event(Event),
    Task(Task),
}

/// Returns `task.$property_name` or `event.$property_name`, depending on whether self is a Task or an Event
macro_rules! synthetise_common_getter {
    ($property_name:ident, $return_type:ty) => {
        pub fn $property_name(&self) -> $return_type {
            match self {
                Item::Event(e) => e.$property_name(),
                Item::Task(t) => t.$property_name(),
            }
        }
    }
}

impl Item {
    synthetise_common_getter!(id, u64);
    synthetise_common_getter!(title, &str);
    synthetise_common_getter!(description, Option<&str>);

    /// The day this item is shown on: the due date of a task, the date of an event
    pub fn date(&self) -> NaiveDate {
        match self {
            Item::Event(e) => e.date(),
            Item::Task(t) => t.due_date(),
        }
    }

    /// The style tag of the chip: the priority of a task, the category of an event
    pub fn tag(&self) -> &str {
        match self {
            Item::Event(e) => e.category().as_str(),
            Item::Task(t) => t.priority().as_str(),
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Item::Event(_))
    }

    pub fn is_task(&self) -> bool {
        matches!(self, Item::Task(_))
    }
}

impl From<Task> for Item {
    fn from(task: Task) -> Self {
        Item::Task(task)
    }
}

impl From<Event> for Item {
    fn from(event: Event) -> Self {
        Item::Event(event)
    }
}

/// The content of the detail modal of a calendar item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDetail {
    pub title: String,
    pub description: String,
    pub date: String,
    /// `High Priority` for tasks, the category for events
    pub badge: String,
    /// The status of a task. `None` for events
    pub status: Option<String>,
    /// The assignee of a task. `None` for events
    pub assignee: Option<String>,
}

impl Item {
    pub fn detail(&self) -> ItemDetail {
        let description = self.description()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description provided")
            .to_string();
        let date = crate::utils::format_day(self.date());

        match self {
            Item::Task(t) => ItemDetail {
                title: t.title().to_string(),
                description,
                date,
                badge: format!("{} Priority", t.priority().label()),
                status: Some(crate::utils::capitalize(t.status().as_str())),
                assignee: Some(t.assignee_name().unwrap_or("Unassigned").to_string()),
            },
            Item::Event(e) => ItemDetail {
                title: e.title().to_string(),
                description,
                date,
                badge: e.category().label(),
                status: None,
                assignee: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;
    use crate::task::Priority;

    #[test]
    fn details() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let task = Item::from(Task::new(1, "Proposal", day, Priority::High).with_assignee(2, "Jane Smith"));
        let detail = task.detail();
        assert_eq!(detail.badge, "High Priority");
        assert_eq!(detail.description, "No description provided");
        assert_eq!(detail.status.as_deref(), Some("Pending"));
        assert_eq!(detail.assignee.as_deref(), Some("Jane Smith"));
        assert_eq!(detail.date, "2024-06-15");
        assert_eq!(task.tag(), "high");

        let event = Item::from(Event::new(9, "Company Holiday", day, EventCategory::Holiday).with_description("Office closed"));
        let detail = event.detail();
        assert_eq!(detail.badge, "Holiday");
        assert_eq!(detail.description, "Office closed");
        assert_eq!(detail.status, None);
        assert!(event.is_event());
        assert_eq!(event.id(), 9);
    }
}
