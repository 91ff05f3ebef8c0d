//! Conflict detection over existing bookings.
//!
//! A conflict is two allocations sharing a resource whose events' spans
//! overlap under the half-open rule. The functions here operate on plain
//! records; the storage layer supplies them and owns transactional
//! guarantees.

use serde::Serialize;

use crate::event::Event;
use crate::span::TimeSpan;
use crate::types::ResourceId;

/// Returns the events whose spans overlap a proposed span.
///
/// Used by the allocation check: the proposed span is the event being
/// booked, `bookings` are the events already holding the resource. Order of
/// the input is preserved in the output.
pub fn overlapping(span: TimeSpan, bookings: &[Event]) -> Vec<&Event> {
    bookings
        .iter()
        .filter(|event| span.overlaps(&event.span))
        .collect()
}

/// Two events double-booking the same resource.
///
/// Pairs are unordered: each combination is reported once, with `first`
/// preceding `second` in the input ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictPair {
    pub resource_id: ResourceId,
    pub first: Event,
    pub second: Event,
}

/// Enumerates every conflicting pair across bookings grouped by resource.
///
/// Within each group every pair of events is compared, O(n²) per resource.
/// Per-resource booking counts are expected to be small, so the quadratic
/// scan stays cheap.
pub fn conflict_pairs(groups: &[(ResourceId, Vec<Event>)]) -> Vec<ConflictPair> {
    let mut conflicts = Vec::new();
    for (resource_id, events) in groups {
        for (i, first) in events.iter().enumerate() {
            for second in &events[i + 1..] {
                if first.span.overlaps(&second.span) {
                    conflicts.push(ConflictPair {
                        resource_id: resource_id.clone(),
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }
        }
    }
    conflicts
}
