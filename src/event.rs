//! Calendar events

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::capitalize;

pub type EventId = u64;

/// The kind of an event. This is an open-ended tag: unknown values are kept as-is
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    General,
    Meeting,
    Deadline,
    Holiday,
    Other(String),
}

impl EventCategory {
    pub fn as_str(&self) -> &str {
        match self {
            EventCategory::General => "general",
            EventCategory::Meeting => "meeting",
            EventCategory::Deadline => "deadline",
            EventCategory::Holiday => "holiday",
            EventCategory::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

impl Default for EventCategory {
    fn default() -> Self {
        EventCategory::General
    }
}

impl From<String> for EventCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "" | "general" => EventCategory::General,
            "meeting" => EventCategory::Meeting,
            "deadline" => EventCategory::Deadline,
            "holiday" => EventCategory::Holiday,
            _ => EventCategory::Other(tag),
        }
    }
}

impl From<&str> for EventCategory {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> String {
        category.as_str().to_string()
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar event, as returned by `/api/events`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(with = "crate::utils::day_format")]
    date: NaiveDate,
    #[serde(default)]
    category: EventCategory,
    #[serde(default)]
    created_by: Option<String>,
}

impl Event {
    pub fn new<S: ToString>(id: EventId, title: S, date: NaiveDate, category: EventCategory) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: None,
            date,
            category,
            created_by: None,
        }
    }

    pub fn with_description<S: ToString>(mut self, description: S) -> Self {
        self.description = Some(description.to_string()).filter(|d| !d.is_empty());
        self
    }

    pub fn id(&self) -> EventId                { self.id }
    pub fn title(&self) -> &str                { &self.title }
    pub fn description(&self) -> Option<&str>  { self.description.as_deref() }
    pub fn date(&self) -> NaiveDate            { self.date }
    pub fn category(&self) -> &EventCategory   { &self.category }
    pub fn created_by(&self) -> Option<&str>   { self.created_by.as_deref() }
}

/// The raw content of the "add event" form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub category: EventCategory,
}

impl EventForm {
    /// Build the event, provided the title and date are set
    pub fn to_event(&self, id: EventId) -> Result<Event> {
        let title = self.title.trim();
        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        let date = match self.date {
            Some(date) if missing.is_empty() => date,
            Some(_) => return Err(Error::MissingFields(missing)),
            None => {
                missing.push("date");
                return Err(Error::MissingFields(missing));
            },
        };

        Ok(Event::new(id, title, date, self.category.clone())
            .with_description(self.description.trim()))
    }
}
