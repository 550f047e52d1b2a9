use super::{CalendarFormat, CommandResult};
use chrono::Local;
use nightlist::calendar::export::{event_to_ics_for, google_calendar_url_for};
use nightlist::calendar::{resolve_schedule, CalendarFields, Event, EventTiming};
use nightlist::error::{other_error, SiteResult};
use std::path::Path;
use tracing::warn;

/// Read a catalog file: a JSON array of events
pub async fn load_events(path: &Path) -> SiteResult<Vec<Event>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Print calendar output for every event, or just `id`
pub async fn calendar(path: &Path, id: Option<&str>, format: CalendarFormat) -> CommandResult {
    let events = load_events(path).await?;
    let selected: Vec<&Event> = events
        .iter()
        .filter(|event| id.map_or(true, |id| event.id == id))
        .collect();

    if selected.is_empty() {
        return Err(other_error(&format!(
            "No matching events in {}",
            path.display()
        )));
    }

    for event in selected {
        let schedule = match resolve_schedule(&event.time_spec()) {
            Ok(schedule) => schedule,
            Err(e) => {
                warn!("Skipping event '{}': {}", event.id, e);
                continue;
            }
        };

        match format {
            CalendarFormat::Fields => {
                let fields = CalendarFields::from_schedule(event, &schedule);
                println!("{}  {}", event.id, schedule.display_range());
                println!("{}", serde_json::to_string_pretty(&fields)?);
            }
            CalendarFormat::Ics => print!("{}", event_to_ics_for(event, &schedule)),
            CalendarFormat::Google => {
                println!("{}", google_calendar_url_for(event, &schedule)?)
            }
        }
    }

    Ok(())
}

/// Print an upcoming/today/past badge per event
pub async fn status(path: &Path) -> CommandResult {
    let events = load_events(path).await?;
    let today = Local::now().date_naive();

    for event in &events {
        match resolve_schedule(&event.time_spec()) {
            Ok(schedule) => {
                let days = schedule.start.date().signed_duration_since(today).num_days();
                println!(
                    "{:<8} {:>5}d  {}  {}",
                    EventTiming::from_days(days),
                    days,
                    event.id,
                    schedule.display_range()
                );
            }
            Err(e) => println!("{:<8} {:>6}  {}  ({})", "unknown", "-", event.id, e),
        }
    }

    Ok(())
}
