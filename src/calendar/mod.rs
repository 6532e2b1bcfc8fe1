//! The month calendar: a 42-cell grid with the tasks and events of each day
//!
//! [`render_month`] is a pure function; [`CalendarManager`] fetches the data it needs and handles navigation.

pub mod manager;
pub use manager::CalendarManager;

use chrono::{Datelike, NaiveDate};

use crate::event::Event;
use crate::item::Item;
use crate::task::Task;
use crate::utils::{first_day_of_month, last_day_of_month, shift_months};

/// Six full weeks, whatever the length of the month
pub const GRID_CELLS: usize = 42;

/// Weeks start on Sunday
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// `June 2024`
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

#[derive(Clone, Debug, PartialEq)]
pub enum DayCell {
    /// A day of the previous or next month. Disabled, and never carries any item
    Filler { day: u32 },
    Day(MonthDay),
}

impl DayCell {
    pub fn is_filler(&self) -> bool {
        matches!(self, DayCell::Filler { .. })
    }

    /// The number printed in the cell
    pub fn day_number(&self) -> u32 {
        match self {
            DayCell::Filler { day } => *day,
            DayCell::Day(day) => day.date.day(),
        }
    }
}

/// A day of the displayed month
#[derive(Clone, Debug, PartialEq)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Tasks first, then events, each in the order they were given
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid {
    label: String,
    first: NaiveDate,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn label(&self) -> &str        { &self.label }
    /// The first day of the displayed month
    pub fn first(&self) -> NaiveDate   { self.first }
    pub fn cells(&self) -> &[DayCell]  { &self.cells }

    pub fn leading_fillers(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_filler()).count()
    }

    pub fn trailing_fillers(&self) -> usize {
        self.cells.iter().rev().take_while(|cell| cell.is_filler()).count()
    }

    /// The cell of a given day, if it belongs to the displayed month
    pub fn day(&self, date: NaiveDate) -> Option<&MonthDay> {
        self.cells.iter().find_map(|cell| match cell {
            DayCell::Day(day) if day.date == date => Some(day),
            _ => None,
        })
    }

    /// The six rows of the grid
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.cells.chunks(7)
    }
}

/// Lay out the month of `reference` and put every task and event on the cell of its day.
///
/// Items are matched on their calendar date only. Items outside of the month are ignored.
pub fn render_month(reference: NaiveDate, today: NaiveDate, tasks: &[Task], events: &[Event]) -> MonthGrid {
    let first = first_day_of_month(reference);
    let last = last_day_of_month(reference);
    let leading = first.weekday().num_days_from_sunday();
    let previous_month_last = last_day_of_month(shift_months(first, -1)).day();

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for offset in 0..leading {
        cells.push(DayCell::Filler { day: previous_month_last - leading + 1 + offset });
    }

    for date in first.iter_days().take_while(|date| *date <= last) {
        let mut items: Vec<Item> = tasks.iter()
            .filter(|task| task.due_date() == date)
            .cloned()
            .map(Item::from)
            .collect();
        items.extend(events.iter()
            .filter(|event| event.date() == date)
            .cloned()
            .map(Item::from));

        cells.push(DayCell::Day(MonthDay { date, is_today: date == today, items }));
    }

    let mut next_day = 1;
    while cells.len() < GRID_CELLS {
        cells.push(DayCell::Filler { day: next_day });
        next_day += 1;
    }

    MonthGrid { label: month_label(first), first, cells }
}
