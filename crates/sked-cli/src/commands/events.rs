//! Event management commands.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use sked_core::{Event, EventId, Resource};
use sked_db::Database;

use super::util::{format_span, parse_when};

/// Creates an event and prints its ID to stdout.
pub fn add(
    db: &mut Database,
    title: &str,
    start: &str,
    end: &str,
    description: Option<&str>,
) -> Result<()> {
    let start = parse_when(start).context("invalid --start")?;
    let end = parse_when(end).context("invalid --end")?;
    let event = db
        .create_event(title, start, end, description)
        .context("failed to create event")?;
    println!("{}", event.id);
    Ok(())
}

/// An event with its allocated resources, for display.
#[derive(Debug, Serialize)]
pub struct EventEntry {
    #[serde(flatten)]
    pub event: Event,
    pub resources: Vec<Resource>,
}

fn collect_entries(db: &Database) -> Result<Vec<EventEntry>> {
    let mut entries = Vec::new();
    for event in db.list_events()? {
        let resources = db
            .allocations_for_event(&event.id)?
            .into_iter()
            .map(|(resource, _)| resource)
            .collect();
        entries.push(EventEntry { event, resources });
    }
    Ok(entries)
}

/// Format events for human-readable output.
fn format_events(entries: &[EventEntry]) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    if entries.is_empty() {
        writeln!(output, "No events scheduled.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<38}  {:<24}  {:<26}  Resources",
        "ID", "Title", "When"
    )
    .unwrap();
    for entry in entries {
        let names: Vec<&str> = entry.resources.iter().map(|r| r.name.as_str()).collect();
        writeln!(
            output,
            "{:<38}  {:<24}  {:<26}  {}",
            entry.event.id,
            entry.event.title,
            format_span(entry.event.span),
            names.join(", ")
        )
        .unwrap();
    }
    output
}

/// Runs the event list command.
pub fn list<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let entries = collect_entries(db)?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        write!(writer, "{}", format_events(&entries))?;
    }
    Ok(())
}

/// Edits an event; omitted fields keep their current value.
///
/// The engine re-checks allocated resources when the window changes and
/// rejects the edit on conflict.
pub fn edit(
    db: &mut Database,
    id: &str,
    title: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let id = EventId::new(id)?;
    let current = db.get_event(&id)?;

    let start = match start {
        Some(s) => parse_when(s).context("invalid --start")?,
        None => current.span.start(),
    };
    let end = match end {
        Some(s) => parse_when(s).context("invalid --end")?,
        None => current.span.end(),
    };
    let title = title.unwrap_or(&current.title);
    let description = description.or(current.description.as_deref());

    let updated = db.update_event(&id, title, start, end, description)?;
    println!("Updated \"{}\" ({})", updated.title, format_span(updated.span));
    Ok(())
}

/// Deletes an event; its allocations go with it.
pub fn delete(db: &mut Database, id: &str) -> Result<()> {
    let id = EventId::new(id)?;
    let event = db.get_event(&id)?;
    db.delete_event(&id)?;
    println!("Deleted \"{}\"", event.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sked_core::ResourceType;

    fn at(hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn list_shows_events_with_resources() {
        let mut db = Database::open_in_memory().unwrap();
        let event = db.create_event("Morning", at(9), at(12), None).unwrap();
        let room = db.create_resource("Room A", ResourceType::Room).unwrap();
        db.allocate(&event.id, &room.id).unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, false).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Morning"));
        assert!(output.contains("2025-03-01 09:00 - 12:00"));
        assert!(output.contains("Room A"));
    }

    #[test]
    fn list_empty_database() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        list(&mut output, &db, false).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No events scheduled.\n"
        );
    }

    #[test]
    fn list_json_is_parseable() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_event("Morning", at(9), at(12), Some("notes"))
            .unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(parsed[0]["title"], "Morning");
        assert_eq!(parsed[0]["description"], "notes");
        assert!(parsed[0]["resources"].as_array().unwrap().is_empty());
    }
}
