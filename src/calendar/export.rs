//! "Add to Calendar" targets: Google Calendar links and .ics documents.

use super::models::{Event, EventSchedule};
use super::schedule::resolve_schedule;
use crate::error::{other_error, SiteResult};
use icalendar::{Calendar, Component, EventLike};
use url::Url;

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Compact floating timestamp used by both targets
fn compact(dt: &chrono::NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Google Calendar "create event" link for an event
pub fn google_calendar_url(event: &Event) -> SiteResult<String> {
    let schedule = resolve_schedule(&event.time_spec())?;
    google_calendar_url_for(event, &schedule)
}

pub fn google_calendar_url_for(event: &Event, schedule: &EventSchedule) -> SiteResult<String> {
    let dates = format!("{}/{}", compact(&schedule.start), compact(&schedule.end));
    let url = Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title.as_str()),
            ("dates", dates.as_str()),
            ("details", event.description.as_str()),
            ("location", event.location.as_str()),
        ],
    )
    .map_err(|e| other_error(&format!("Failed to build calendar link: {}", e)))?;
    Ok(url.to_string())
}

/// Single-event .ics document for an event
pub fn event_to_ics(event: &Event) -> SiteResult<String> {
    let schedule = resolve_schedule(&event.time_spec())?;
    Ok(event_to_ics_for(event, &schedule))
}

pub fn event_to_ics_for(event: &Event, schedule: &EventSchedule) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@nightlist", event.id));
    ics_event.summary(&event.title);

    // Floating local times, the listing has no zone information
    ics_event.add_property("DTSTART", compact(&schedule.start));
    ics_event.add_property("DTEND", compact(&schedule.end));

    if !event.description.is_empty() {
        ics_event.description(&event.description);
    }
    if !event.location.is_empty() {
        ics_event.location(&event.location);
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    cal.done().to_string()
}
