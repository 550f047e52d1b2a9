use crate::error::{invalid_date, invalid_time, SiteResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number for a full or abbreviated (3+ letters) English month name
pub fn parse_month(name: &str) -> Option<u32> {
    let name = name.trim().trim_end_matches('.').to_ascii_lowercase();
    if name.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|month| month.starts_with(&name))
        .map(|index| index as u32 + 1)
}

/// A non-empty run of ASCII digits as a number
///
/// Stricter than `str::parse`, which lets a leading `+` through.
fn parse_digits(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse a listing date in `<Month> <Day>, <Year>` form, e.g. "July 15, 2025"
pub fn parse_event_date(date_str: &str) -> SiteResult<NaiveDate> {
    let input = date_str.trim();
    let (month_day, year) = input.split_once(',').ok_or_else(|| invalid_date(input))?;

    let mut parts = month_day.split_whitespace();
    let month = parts
        .next()
        .and_then(parse_month)
        .ok_or_else(|| invalid_date(input))?;
    let day = parts
        .next()
        .and_then(parse_digits)
        .ok_or_else(|| invalid_date(input))?;
    if parts.next().is_some() {
        return Err(invalid_date(input));
    }

    let year = year.trim().parse::<i32>().map_err(|_| invalid_date(input))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid_date(input))
}

/// Parse a clock time, e.g. "2:00 PM", "11 pm" or 24-hour "23:30"
///
/// 12 AM is midnight and 12 PM is noon. Without an AM/PM suffix the time is
/// read as 24-hour and minutes are required.
pub fn parse_clock_time(time_str: &str) -> SiteResult<NaiveTime> {
    let input = time_str.trim();
    let upper = input.to_ascii_uppercase();

    let (clock, pm) = if let Some(clock) = upper.strip_suffix("AM") {
        (clock.trim_end(), Some(false))
    } else if let Some(clock) = upper.strip_suffix("PM") {
        (clock.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((hour, minute)) if minute.len() == 2 => (parse_digits(hour), parse_digits(minute)),
        Some(_) => return Err(invalid_time(input)),
        None if pm.is_some() => (parse_digits(clock), Some(0)),
        None => return Err(invalid_time(input)),
    };
    let (Some(hour), Some(minute)) = (hour, minute) else {
        return Err(invalid_time(input));
    };

    let hour = match pm {
        Some(_) if !(1..=12).contains(&hour) => return Err(invalid_time(input)),
        Some(false) if hour == 12 => 0,
        Some(true) if hour < 12 => hour + 12,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| invalid_time(input))
}

/// Split "2:00 PM - 11:00 PM" into its start and optional end component
pub fn split_time_range(time_str: &str) -> (&str, Option<&str>) {
    let time_str = time_str.trim();
    match time_str
        .split_once(" - ")
        .or_else(|| time_str.split_once(" – "))
    {
        Some((start, end)) => (start.trim(), Some(end.trim())),
        None => (time_str, None),
    }
}

/// Parse a machine-readable start timestamp into local wall-clock time
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the same with a `Z` or numeric
/// offset (converted to the local zone), and a bare `YYYY-MM-DD` (midnight).
pub fn parse_iso_datetime(iso_str: &str) -> SiteResult<NaiveDateTime> {
    let input = iso_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| invalid_date(input))
}
