//! Shared utilities for CLI commands.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use sked_core::TimeSpan;

/// Parse a CLI timestamp.
///
/// Accepts RFC 3339 (`2025-03-01T09:00:00Z`), a naive datetime interpreted
/// as UTC (`2025-03-01T09:00` or with seconds), or a bare date meaning
/// midnight UTC (`2025-03-01`). The scheduler runs on a single consistent
/// clock; no timezone conversion happens here.
pub fn parse_when(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()));
    }
    anyhow::bail!(
        "invalid datetime: {s}. Use RFC 3339 (2025-03-01T09:00:00Z), \
         YYYY-MM-DDTHH:MM, or YYYY-MM-DD"
    )
}

/// Format a span for human output.
///
/// Same-day spans abbreviate the end to its time of day, e.g.
/// `2025-03-01 09:00 - 12:00`.
pub fn format_span(span: TimeSpan) -> String {
    let start = span.start().format("%Y-%m-%d %H:%M");
    if span.start().date_naive() == span.end().date_naive() {
        format!("{start} - {}", span.end().format("%H:%M"))
    } else {
        format!("{start} - {}", span.end().format("%Y-%m-%d %H:%M"))
    }
}
