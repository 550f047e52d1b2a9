use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A catalog event as the site lists it
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Free-text date, e.g. "July 15, 2025"
    pub date: String,
    /// Free-text time or range, e.g. "2:00 PM - 11:00 PM"
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Authoritative start timestamp, overrides `date` + `time` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_date: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub artists: Vec<String>,
}

impl Event {
    /// The date/time fields the schedule is derived from
    pub fn time_spec(&self) -> EventTimeSpec<'_> {
        EventTimeSpec {
            date: &self.date,
            time: non_empty(&self.time),
            end_date: self.end_date.as_deref().and_then(non_empty),
            end_time: self.end_time.as_deref().and_then(non_empty),
            iso_date: self.iso_date.as_deref().and_then(non_empty),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Heterogeneous date/time description of when an event happens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTimeSpec<'a> {
    pub date: &'a str,
    pub time: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub iso_date: Option<&'a str>,
}

/// Resolved start and end of an event in local wall-clock time
///
/// `end` is never before `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Calendar-ready fields for "Add to Calendar" links and exports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFields {
    /// `YYYY-MM-DD`
    pub start_date: String,
    pub end_date: String,
    /// `HH:MM:SS`
    pub start_time: String,
    pub end_time: String,
    pub summary: String,
    pub description: String,
    pub location: String,
}
