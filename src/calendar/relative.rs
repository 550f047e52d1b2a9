use crate::error::SiteResult;
use crate::utils::time::parse_iso_datetime;
use chrono::{Local, NaiveDate};
use std::fmt;

/// Where an event falls relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTiming {
    Upcoming,
    Today,
    Past,
}

impl EventTiming {
    /// Classify a day offset as returned by [`days_until`]
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d > 0 => EventTiming::Upcoming,
            0 => EventTiming::Today,
            _ => EventTiming::Past,
        }
    }
}

impl fmt::Display for EventTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventTiming::Upcoming => "upcoming",
            EventTiming::Today => "today",
            EventTiming::Past => "past",
        };
        f.pad(label)
    }
}

/// Whole calendar days from `today` to the day of `iso_date`
///
/// Both sides are compared as local calendar days, so the time of day
/// never matters.
pub fn days_until(iso_date: &str, today: NaiveDate) -> SiteResult<i64> {
    let event_day = parse_iso_datetime(iso_date)?.date();
    Ok(event_day.signed_duration_since(today).num_days())
}

/// `days_until` measured from the current local date
pub fn days_until_event(iso_date: &str) -> SiteResult<i64> {
    days_until(iso_date, Local::now().date_naive())
}

pub fn event_timing(iso_date: &str, today: NaiveDate) -> SiteResult<EventTiming> {
    days_until(iso_date, today).map(EventTiming::from_days)
}

// The predicates answer false for timestamps that cannot be parsed.

pub fn is_upcoming_event(iso_date: &str) -> bool {
    matches!(days_until_event(iso_date), Ok(days) if days > 0)
}

pub fn is_event_today(iso_date: &str) -> bool {
    matches!(days_until_event(iso_date), Ok(0))
}

pub fn is_past_event(iso_date: &str) -> bool {
    matches!(days_until_event(iso_date), Ok(days) if days < 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_until_ignores_time_of_day() {
        let today = day(2025, 9, 15);
        assert_eq!(days_until("2025-09-15T00:00:00", today).unwrap(), 0);
        assert_eq!(days_until("2025-09-15T23:59:59", today).unwrap(), 0);
        assert_eq!(days_until("2025-09-16T00:00:00", today).unwrap(), 1);
        assert_eq!(days_until("2025-09-14T23:00:00", today).unwrap(), -1);
    }

    #[test]
    fn test_days_until_across_months() {
        let today = day(2025, 12, 30);
        assert_eq!(days_until("2026-01-02", today).unwrap(), 3);
        assert_eq!(days_until("2025-11-30", today).unwrap(), -30);
    }

    #[test]
    fn test_event_timing() {
        let today = day(2025, 9, 15);
        assert_eq!(event_timing("2025-10-01", today).unwrap(), EventTiming::Upcoming);
        assert_eq!(event_timing("2025-09-15T21:00:00", today).unwrap(), EventTiming::Today);
        assert_eq!(event_timing("2025-01-01", today).unwrap(), EventTiming::Past);
        assert_eq!(EventTiming::Upcoming.to_string(), "upcoming");
        assert!(event_timing("garbage", today).is_err());
    }

    #[test]
    fn test_predicates_against_local_today() {
        let today = Local::now().date_naive();
        let at_midnight = |date: NaiveDate| format!("{}T00:00:00", date.format("%Y-%m-%d"));

        let tomorrow = at_midnight(today + Duration::days(1));
        let yesterday = at_midnight(today - Duration::days(1));
        let now = at_midnight(today);

        assert_eq!(days_until_event(&now).unwrap(), 0);
        assert_eq!(days_until_event(&tomorrow).unwrap(), 1);
        assert_eq!(days_until_event(&yesterday).unwrap(), -1);

        assert!(is_event_today(&now));
        assert!(is_upcoming_event(&tomorrow));
        assert!(is_past_event(&yesterday));
        assert!(!is_past_event(&tomorrow));
        assert!(!is_upcoming_event(&now));
    }

    #[test]
    fn test_predicates_are_false_for_garbage() {
        assert!(!is_upcoming_event("not a date"));
        assert!(!is_event_today("not a date"));
        assert!(!is_past_event("not a date"));
    }
}
