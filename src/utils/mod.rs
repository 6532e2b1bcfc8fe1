//! Some utility functions

pub mod comparison;

use chrono::{Datelike, Duration, NaiveDate, ParseResult};

/// Wire format of every date exchanged with the backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
///
/// A trailing time component (`2024-06-15T23:00:00`, `2024-06-15 23:00`) is accepted and ignored:
/// dates are always compared as local calendar days.
pub fn parse_day(text: &str) -> ParseResult<NaiveDate> {
    let text = text.trim();
    let day_part = text
        .find(|c: char| c == 'T' || c == ' ')
        .map(|pos| &text[..pos])
        .unwrap_or(text);
    NaiveDate::parse_from_str(day_part, DATE_FORMAT)
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Human label of a due date, relative to `today`
pub fn due_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        String::from("Today")
    } else if date == today + Duration::days(1) {
        String::from("Tomorrow")
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Upper-case the first letter, leave the rest alone
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(date);
    shift_months(first, 1)
        .pred_opt()
        .unwrap_or(first)
}

/// First day of the month `delta` months away from `date`
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + delta;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// An inclusive range of days
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The whole month `date` belongs to
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: first_day_of_month(date),
            end: last_day_of_month(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Serde helpers for `YYYY-MM-DD` fields
pub mod day_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_day(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_day(&text).map_err(serde::de::Error::custom)
    }
}

/// Same as [`day_format`], for optional fields
pub mod opt_day_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&super::format_day(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => super::parse_day(&text).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_ignores_time_of_day() {
        assert_eq!(parse_day("2024-06-15").unwrap(), day(2024, 6, 15));
        assert_eq!(parse_day("2024-06-15T23:00:00").unwrap(), day(2024, 6, 15));
        assert_eq!(parse_day("2024-06-15 00:30").unwrap(), day(2024, 6, 15));
        assert!(parse_day("15/06/2024").is_err());
    }

    #[test]
    fn due_labels() {
        let today = day(2024, 6, 15);
        assert_eq!(due_label(today, today), "Today");
        assert_eq!(due_label(day(2024, 6, 16), today), "Tomorrow");
        assert_eq!(due_label(day(2024, 6, 14), today), "Jun 14, 2024");
        assert_eq!(due_label(day(2025, 1, 3), today), "Jan 3, 2025");
    }

    #[test]
    fn month_arithmetic() {
        assert_eq!(shift_months(day(2024, 1, 31), -1), day(2023, 12, 1));
        assert_eq!(shift_months(day(2024, 12, 5), 1), day(2025, 1, 1));
        assert_eq!(shift_months(day(2024, 3, 5), -14), day(2023, 1, 1));
        assert_eq!(last_day_of_month(day(2024, 2, 10)), day(2024, 2, 29));
        assert_eq!(last_day_of_month(day(2023, 2, 10)), day(2023, 2, 28));
        assert_eq!(last_day_of_month(day(2024, 12, 1)), day(2024, 12, 31));
    }

    #[test]
    fn month_range() {
        let range = DateRange::month_of(day(2024, 6, 15));
        assert_eq!(range.start, day(2024, 6, 1));
        assert_eq!(range.end, day(2024, 6, 30));
        assert!(range.contains(day(2024, 6, 30)));
        assert!(!range.contains(day(2024, 7, 1)));
    }

    #[test]
    fn capitalize_words() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("h"), "H");
    }
}
