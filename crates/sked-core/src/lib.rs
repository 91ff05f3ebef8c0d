//! Core domain logic for the resource scheduler.
//!
//! This crate contains the fundamental types and logic for:
//! - Time spans: half-open intervals and the overlap relation
//! - Conflict detection: finding double-booked resources
//! - Reporting: utilization aggregation over a date range
//!
//! Everything here is pure data and pure functions; persistence lives in
//! `sked-db` and the command-line surface in `sked-cli`.

mod allocation;
pub mod conflict;
mod event;
pub mod report;
mod resource;
pub mod resource_type;
pub mod span;
pub mod types;

pub use allocation::Allocation;
pub use conflict::{ConflictPair, conflict_pairs, overlapping};
pub use event::Event;
pub use report::{Utilization, utilization};
pub use resource::Resource;
pub use resource_type::{ResourceType, UnknownResourceType};
pub use span::{InvalidSpan, TimeSpan};
pub use types::{AllocationId, EventId, ResourceId, ValidationError};
