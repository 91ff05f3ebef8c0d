//! Utilization aggregation over a date range.

use serde::Serialize;

use crate::event::Event;
use crate::span::TimeSpan;

/// Total booked hours for a resource within a queried range, with the
/// matching bookings.
#[derive(Debug, Clone, Serialize)]
pub struct Utilization {
    /// Sum of full event durations in fractional hours.
    pub total_hours: f64,
    /// Matching events ordered by start time ascending.
    pub bookings: Vec<Event>,
}

/// Aggregates the bookings whose span intersects `range`.
///
/// Intersection uses the same half-open overlap test as conflict detection,
/// so an event ending exactly at `range.start` is excluded. An event
/// spanning a range boundary contributes its full duration, not the clipped
/// intersection.
pub fn utilization(bookings: &[Event], range: TimeSpan) -> Utilization {
    let mut matching: Vec<Event> = bookings
        .iter()
        .filter(|event| range.overlaps(&event.span))
        .cloned()
        .collect();
    // Tie-break on id so equal start times order deterministically.
    matching.sort_by(|a, b| {
        a.span
            .start()
            .cmp(&b.span.start())
            .then_with(|| a.id.cmp(&b.id))
    });

    // Fold from positive zero: `Sum for f64` starts at -0.0, which would
    // format an empty report's total as "-0.0".
    let total_hours = matching
        .iter()
        .map(|event| event.span.duration_hours())
        .fold(0.0, |acc, hours| acc + hours);
    Utilization {
        total_hours,
        bookings: matching,
    }
}
