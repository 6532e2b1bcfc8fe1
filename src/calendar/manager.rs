//! Fetches what the month grid shows, and handles month navigation and event creation

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::event::{Event, EventForm, EventId};
use crate::filter::{Role, TaskFilter};
use crate::item::{Item, ItemDetail};
use crate::notification::Notification;
use crate::progress::{FeedbackSender, LoadProgress};
use crate::task::{Task, TaskId};
use crate::traits::{Notifier, TaskBackend};
use crate::utils::{shift_months, DateRange};

use super::{render_month, MonthGrid};

pub struct CalendarManager<B, N>
where
    B: TaskBackend,
    N: Notifier,
{
    backend: B,
    notifier: N,
    role: Role,
    /// Any day of the displayed month
    reference: NaiveDate,

    tasks: Vec<Task>,
    events: Vec<Event>,
    progress: LoadProgress,
}

impl<B, N> CalendarManager<B, N>
where
    B: TaskBackend,
    N: Notifier,
{
    /// Create a manager showing the month of `reference`. Nothing is fetched until [`Self::refresh`] is called
    pub fn new(backend: B, notifier: N, role: Role, reference: NaiveDate) -> Self {
        Self {
            backend,
            notifier,
            role,
            reference,
            tasks: Vec::new(),
            events: Vec::new(),
            progress: LoadProgress::new(),
        }
    }

    pub fn with_feedback_channel(backend: B, notifier: N, role: Role, reference: NaiveDate, feedback: FeedbackSender) -> Self {
        let mut manager = Self::new(backend, notifier, role, reference);
        manager.progress = LoadProgress::new_with_feedback_channel(feedback);
        manager
    }

    pub fn backend(&self) -> &B             { &self.backend }
    pub fn notifier(&self) -> &N            { &self.notifier }
    pub fn reference(&self) -> NaiveDate    { self.reference }
    pub fn tasks(&self) -> &[Task]          { &self.tasks }
    pub fn events(&self) -> &[Event]        { &self.events }
    pub fn is_loading(&self) -> bool        { self.progress.is_loading() }

    /// Fetch the tasks and the events of the displayed month
    pub async fn refresh(&mut self) -> Result<()> {
        self.progress.start("calendar");
        match self.fetch().await {
            Ok((tasks, events)) => {
                self.progress.finish("calendar items", tasks.len() + events.len());
                self.tasks = tasks;
                self.events = events;
                Ok(())
            },
            Err(err) => {
                self.progress.fail("calendar", &err);
                self.tasks.clear();
                self.events.clear();
                self.notifier.notify(Notification::danger("Failed to load the calendar. Please try again later."));
                Err(err)
            },
        }
    }

    async fn fetch(&self) -> Result<(Vec<Task>, Vec<Event>)> {
        let tasks = self.backend.get_tasks(&TaskFilter::default(), self.role).await?;
        let events = self.backend.get_events(DateRange::month_of(self.reference)).await?;
        Ok((tasks, events))
    }

    pub async fn previous_month(&mut self) -> Result<()> {
        self.reference = shift_months(self.reference, -1);
        self.refresh().await
    }

    pub async fn next_month(&mut self) -> Result<()> {
        self.reference = shift_months(self.reference, 1);
        self.refresh().await
    }

    /// Go back to the month of `today`
    pub async fn today(&mut self, today: NaiveDate) -> Result<()> {
        self.reference = today;
        self.refresh().await
    }

    pub fn grid(&self, today: NaiveDate) -> MonthGrid {
        render_month(self.reference, today, &self.tasks, &self.events)
    }

    /// Add an event to the displayed calendar. Administrators only.
    ///
    /// The event is only kept locally: it gets the next free id, and the grid is not refetched.
    /// Local events are not sent to the backend, so the next [`Self::refresh`] (or any navigation) drops them.
    pub fn add_event(&mut self, form: &EventForm) -> Result<EventId> {
        if !self.role.is_admin() {
            return Err(Error::Forbidden("create events"));
        }

        let id = self.events.iter().map(|event| event.id()).max().unwrap_or(0) + 1;
        let event = match form.to_event(id) {
            Ok(event) => event,
            Err(err) => {
                self.notifier.notify(Notification::warning("Please enter a title and date for the event."));
                return Err(err);
            },
        };

        log::info!("Added event {} ({}) on {}", id, event.title(), event.date());
        self.events.push(event);
        self.notifier.notify(Notification::success("Event created successfully!"));
        Ok(id)
    }

    pub fn task_detail(&self, task_id: TaskId) -> Result<ItemDetail> {
        self.tasks.iter()
            .find(|task| task.id() == task_id)
            .map(|task| Item::from(task.clone()).detail())
            .ok_or(Error::UnknownTask(task_id))
    }

    pub fn event_detail(&self, event_id: EventId) -> Option<ItemDetail> {
        self.events.iter()
            .find(|event| event.id() == event_id)
            .map(|event| Item::from(event.clone()).detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;
    use crate::mock_backend::MockBackend;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 18).unwrap()
    }

    #[tokio::test]
    async fn local_events_get_the_next_id() {
        let mut calendar = CalendarManager::new(MockBackend::sample(today()), Vec::new(), Role::Admin, today());
        calendar.refresh().await.unwrap();
        let requests = calendar.backend().requests().len();

        let form = EventForm {
            title: " Launch ".into(),
            date: Some(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
            category: EventCategory::Deadline,
            ..EventForm::default()
        };
        assert_eq!(calendar.add_event(&form).unwrap(), 4);
        assert_eq!(calendar.backend().requests().len(), requests);

        let grid = calendar.grid(today());
        let cell = grid.day(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()).unwrap();
        assert_eq!(cell.items[0].title(), "Launch");
        assert_eq!(calendar.event_detail(4).unwrap().badge, "Deadline");
    }

    #[tokio::test]
    async fn members_cannot_add_events() {
        let mut calendar = CalendarManager::new(MockBackend::sample(today()), Vec::new(), Role::Member, today());
        let form = EventForm { title: "Party".into(), date: Some(today()), ..EventForm::default() };
        assert!(matches!(calendar.add_event(&form), Err(Error::Forbidden(_))));
        assert!(calendar.notifier().is_empty());
    }
}
