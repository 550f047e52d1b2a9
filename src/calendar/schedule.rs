use super::models::{CalendarFields, Event, EventSchedule, EventTimeSpec};
use crate::error::SiteResult;
use crate::utils::time::{
    parse_clock_time, parse_event_date, parse_iso_datetime, split_time_range,
};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::debug;

/// Length assumed for events that give no end
pub const DEFAULT_DURATION_HOURS: i64 = 2;

/// Combine a free-text date with the first component of a free-text time
///
/// A missing time means the start of the day.
fn parse_free_text(date: &str, time: Option<&str>) -> SiteResult<NaiveDateTime> {
    let date = parse_event_date(date)?;
    let time = match time {
        Some(time) => parse_clock_time(split_time_range(time).0)?,
        None => NaiveTime::MIN,
    };
    Ok(date.and_time(time))
}

/// Work out when an event starts and ends
///
/// The start comes from `iso_date` when present, otherwise from `date` and
/// the first part of `time`. The end is the explicit `end_date` + `end_time`
/// when both are given, falling back to the start plus two hours if that
/// lands before the start. Without an explicit end, the second part of the
/// `time` range is placed on the start day (the next day when it would fall
/// before the start, e.g. "11:00 PM - 6:00 AM"), and failing that the start
/// plus two hours is used.
pub fn resolve_schedule(spec: &EventTimeSpec<'_>) -> SiteResult<EventSchedule> {
    let start = match spec.iso_date {
        Some(iso_date) => parse_iso_datetime(iso_date)?,
        None => parse_free_text(spec.date, spec.time)?,
    };

    let end = match (spec.end_date, spec.end_time) {
        (Some(end_date), Some(end_time)) => explicit_end(end_date, end_time, start)?,
        _ => range_end(spec.time, start).unwrap_or_else(|| default_end(start)),
    };

    Ok(EventSchedule { start, end })
}

fn default_end(start: NaiveDateTime) -> NaiveDateTime {
    start + Duration::hours(DEFAULT_DURATION_HOURS)
}

fn explicit_end(end_date: &str, end_time: &str, start: NaiveDateTime) -> SiteResult<NaiveDateTime> {
    let end = parse_free_text(end_date, Some(end_time))?;
    if end < start {
        debug!("Explicit end {} is before start {}, ignoring it", end, start);
        return Ok(default_end(start));
    }
    Ok(end)
}

fn range_end(time: Option<&str>, start: NaiveDateTime) -> Option<NaiveDateTime> {
    let end_part = split_time_range(time?).1?;
    let end_time = match parse_clock_time(end_part) {
        Ok(end_time) => end_time,
        Err(e) => {
            debug!("Unusable end of time range: {}", e);
            return None;
        }
    };

    let end = start.date().and_time(end_time);
    // An earlier clock time than the start means the night runs past midnight
    if end < start {
        Some(end + Duration::days(1))
    } else {
        Some(end)
    }
}

/// Human date, e.g. "Tue, Jul 15"
pub fn display_date(dt: &NaiveDateTime) -> String {
    dt.format("%a, %b %-d").to_string()
}

/// Human time, e.g. "2:00 PM"
pub fn display_time(dt: &NaiveDateTime) -> String {
    dt.format("%-I:%M %p").to_string()
}

impl EventSchedule {
    pub fn is_same_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    /// "Tue, Jul 15 · 2:00 PM - 11:00 PM", or both dates when the event
    /// spans days
    pub fn display_range(&self) -> String {
        if self.is_same_day() {
            format!(
                "{} · {} - {}",
                display_date(&self.start),
                display_time(&self.start),
                display_time(&self.end)
            )
        } else {
            format!(
                "{} · {} - {} · {}",
                display_date(&self.start),
                display_time(&self.start),
                display_date(&self.end),
                display_time(&self.end)
            )
        }
    }
}

/// Calendar-file fields for an event
pub fn calendar_fields(event: &Event) -> SiteResult<CalendarFields> {
    let schedule = resolve_schedule(&event.time_spec())?;
    Ok(CalendarFields::from_schedule(event, &schedule))
}

impl CalendarFields {
    pub fn from_schedule(event: &Event, schedule: &EventSchedule) -> Self {
        Self {
            start_date: schedule.start.format("%Y-%m-%d").to_string(),
            end_date: schedule.end.format("%Y-%m-%d").to_string(),
            start_time: schedule.start.format("%H:%M:%S").to_string(),
            end_time: schedule.end.format("%H:%M:%S").to_string(),
            summary: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
        }
    }
}
