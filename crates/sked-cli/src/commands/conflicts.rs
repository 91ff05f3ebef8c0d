//! Store-wide conflict audit command.

use std::io::Write;

use anyhow::Result;
use sked_db::Database;

use super::util::format_span;

/// Lists every double-booked resource pair, one line per pair.
pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let pairs = db.find_conflicts()?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&pairs)?)?;
        return Ok(());
    }

    if pairs.is_empty() {
        writeln!(writer, "No conflicts found.")?;
        return Ok(());
    }

    for pair in &pairs {
        let resource = db.get_resource(&pair.resource_id)?;
        writeln!(
            writer,
            "{}: \"{}\" ({}) overlaps \"{}\" ({})",
            resource.name,
            pair.first.title,
            format_span(pair.first.span),
            pair.second.title,
            format_span(pair.second.span),
        )?;
    }
    writeln!(writer, "{} conflict(s) found.", pairs.len())?;
    Ok(())
}
