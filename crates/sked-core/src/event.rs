//! Scheduled events with a validated time window.

use serde::{Deserialize, Serialize};

use crate::span::TimeSpan;
use crate::types::EventId;

/// A scheduled event occupying a half-open time window.
///
/// The `start < end` invariant is carried by [`TimeSpan`], so an `Event`
/// with a zero-duration or inverted window cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    pub id: EventId,
    /// Event title, shown in conflict messages.
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The time window the event occupies.
    pub span: TimeSpan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn event_serialization_roundtrip() {
        let event = Event {
            id: EventId::new("evt-1").unwrap(),
            title: "Morning Yoga".to_string(),
            description: None,
            span: TimeSpan::new(
                Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            )
            .unwrap(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("description"));
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn event_rejects_inverted_span() {
        let json = r#"{
            "id": "evt-1",
            "title": "Backwards",
            "span": {"start": "2025-03-01T12:00:00Z", "end": "2025-03-01T09:00:00Z"}
        }"#;
        let result: Result<Event, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
