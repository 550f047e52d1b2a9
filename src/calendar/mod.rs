//! Event time formatting.
//!
//! Listings describe their timing loosely: a free-text date, a free-text
//! time range, sometimes an explicit end, sometimes an ISO timestamp. This
//! module resolves those into a concrete [`EventSchedule`] and renders it as
//! calendar fields, display strings, calendar links and relative-day badges.
//!
//! Everything here is a pure function of its input, apart from the
//! `*_event` predicates which read the local clock.

pub mod export;
pub mod models;
pub mod relative;
pub mod schedule;

pub use export::{event_to_ics, google_calendar_url};
pub use models::{CalendarFields, Event, EventSchedule, EventTimeSpec};
pub use relative::{
    days_until, days_until_event, event_timing, is_event_today, is_past_event, is_upcoming_event,
    EventTiming,
};
pub use schedule::{calendar_fields, display_date, display_time, resolve_schedule};
