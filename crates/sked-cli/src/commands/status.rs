//! Store status dashboard command.

use std::io::Write;

use anyhow::Result;
use sked_db::Database;

use super::util::format_span;

const RECENT_LIMIT: usize = 5;

/// Prints store counts, the conflict tally, and the most recent events.
pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let counts = db.counts()?;
    let conflicts = db.find_conflicts()?.len();

    writeln!(writer, "Events:      {}", counts.events)?;
    writeln!(writer, "Resources:   {}", counts.resources)?;
    writeln!(writer, "Allocations: {}", counts.allocations)?;
    writeln!(writer, "Conflicts:   {conflicts}")?;

    let recent = db.recent_events(RECENT_LIMIT)?;
    if !recent.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Recent events:")?;
        for event in &recent {
            writeln!(writer, "  - {}: {}", event.title, format_span(event.span))?;
        }
    }
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
    fn empty_store() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        run(&mut output, &db).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Events:      0
        Resources:   0
        Allocations: 0
        Conflicts:   0
        ");
    }

    #[test]
    fn counts_and_recent_events() {
        let mut db = Database::open_in_memory().unwrap();
        let room = db.create_resource("Room A", ResourceType::Room).unwrap();
        let morning = db.create_event("Morning", at(9), at(12), None).unwrap();
        let afternoon = db.create_event("Afternoon", at(12), at(14), None).unwrap();
        db.allocate(&morning.id, &room.id).unwrap();
        db.allocate(&afternoon.id, &room.id).unwrap();

        let mut output = Vec::new();
        run(&mut output, &db).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Events:      2
        Resources:   1
        Allocations: 2
        Conflicts:   0

        Recent events:
          - Afternoon: 2025-03-01 12:00 - 14:00
          - Morning: 2025-03-01 09:00 - 12:00
        ");
    }
}
