//! Resource utilization report command.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use sked_core::{ResourceId, TimeSpan, Utilization};
use sked_db::Database;

use super::util::{format_span, parse_when};

/// A utilization report with the percentage of the range booked.
#[derive(Debug, Serialize)]
struct Report {
    resource_id: ResourceId,
    resource_name: String,
    range: TimeSpan,
    #[serde(flatten)]
    utilization: Utilization,
    percent: f64,
}

/// Percentage of the range covered by booked hours, capped at 100.
///
/// Bookings count their full duration even when they extend past the
/// range, so the raw ratio can exceed one.
fn percent_of_range(total_hours: f64, range: TimeSpan) -> f64 {
    let ratio = total_hours / range.duration_hours();
    (ratio * 100.0).min(100.0)
}

/// Runs the report command for one resource over a half-open range.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    resource: &str,
    start: &str,
    end: &str,
    json: bool,
) -> Result<()> {
    let resource_id = ResourceId::new(resource)?;
    let start = parse_when(start).context("invalid --start")?;
    let end = parse_when(end).context("invalid --end")?;
    let range = TimeSpan::new(start, end)?;

    let resource = db.get_resource(&resource_id)?;
    let utilization = db.utilization_report(&resource_id, start, end)?;
    let percent = percent_of_range(utilization.total_hours, range);

    if json {
        let report = Report {
            resource_id,
            resource_name: resource.name,
            range,
            utilization,
            percent,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Utilization for \"{}\" over {}",
        resource.name,
        format_span(range)
    )?;
    if utilization.bookings.is_empty() {
        writeln!(writer, "  (no bookings)")?;
    }
    for booking in &utilization.bookings {
        writeln!(
            writer,
            "  {:<24}  {}  {:.1}h",
            booking.title,
            format_span(booking.span),
            booking.span.duration_hours()
        )?;
    }
    writeln!(
        writer,
        "Total: {:.1} hours booked ({percent:.1}% of range)",
        utilization.total_hours
    )?;
    Ok(())
}
