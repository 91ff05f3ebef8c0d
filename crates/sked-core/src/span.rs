//! Half-open time spans and the overlap relation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for spans that do not end strictly after they start.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("span must end after it starts (start {start}, end {end})")]
pub struct InvalidSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A half-open time interval `[start, end)`.
///
/// The start instant is included, the end instant excluded, so two spans
/// that merely touch (`a.end == b.start`) do not overlap and back-to-back
/// bookings are legal. A span with `start >= end` cannot be constructed;
/// zero-duration spans are rejected at the boundary rather than special-cased
/// in the overlap test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSpan", into = "RawSpan")]
pub struct TimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unvalidated serde representation of a [`TimeSpan`].
#[derive(Serialize, Deserialize)]
struct RawSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSpan {
    /// Creates a span after validating `start < end` strictly.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidSpan> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidSpan { start, end })
        }
    }

    /// The included start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The excluded end instant.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns true iff the two spans share any instant.
    ///
    /// `a` overlaps `b` iff `a.start < b.end && b.start < a.end`. This
    /// classifies identical, partially overlapping, and nested spans as
    /// overlapping, and touching spans as disjoint. Symmetric and O(1).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Span length as a chrono duration. Always positive.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Span length in fractional hours.
    #[expect(
        clippy::cast_precision_loss,
        reason = "millisecond counts are far below f64 mantissa range"
    )]
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 3_600_000.0
    }
}

impl TryFrom<RawSpan> for TimeSpan {
    type Error = InvalidSpan;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl From<TimeSpan> for RawSpan {
    fn from(span: TimeSpan) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}
