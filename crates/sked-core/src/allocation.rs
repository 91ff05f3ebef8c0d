//! The join record committing one resource to one event.

use serde::{Deserialize, Serialize};

use crate::types::{AllocationId, EventId, ResourceId};

/// Commits a resource to an event for the event's entire time window.
///
/// An allocation exists only as long as both endpoints exist; deleting
/// either the event or the resource removes it. At most one allocation may
/// exist per (event, resource) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Unique identifier for this allocation.
    pub id: AllocationId,
    /// The event the resource is committed to.
    pub event_id: EventId,
    /// The committed resource.
    pub resource_id: ResourceId,
}
