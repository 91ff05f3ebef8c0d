//! Allocation and deallocation commands.

use std::io::Write;

use anyhow::Result;
use sked_core::{AllocationId, EventId, ResourceId};
use sked_db::{Database, DbError};

/// Allocates one or more resources to an event.
///
/// Each resource is checked and booked independently: a conflict on one
/// does not block the others. The command fails (after attempting every
/// resource) if any allocation was rejected.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    event: &str,
    resources: &[String],
) -> Result<()> {
    let event_id = EventId::new(event)?;
    let event = db.get_event(&event_id)?;

    let mut rejected = 0usize;
    for resource in resources {
        let resource_id = ResourceId::new(resource.as_str())?;
        match db.allocate(&event_id, &resource_id) {
            Ok(allocation) => {
                let resource = db.get_resource(&resource_id)?;
                writeln!(
                    writer,
                    "Allocated \"{}\" to \"{}\" ({})",
                    resource.name, event.title, allocation.id
                )?;
            }
            Err(err @ (DbError::Conflict { .. } | DbError::DuplicateAllocation { .. })) => {
                writeln!(writer, "Rejected: {err}")?;
                rejected += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if rejected > 0 {
        anyhow::bail!("{rejected} of {} allocation(s) rejected", resources.len());
    }
    Ok(())
}

/// Removes an allocation. Removing an already-absent ID is a no-op.
pub fn deallocate<W: Write>(writer: &mut W, db: &mut Database, allocation: &str) -> Result<()> {
    let id = AllocationId::new(allocation)?;
    if db.delete_allocation(&id)? {
        writeln!(writer, "Removed allocation {id}")?;
    } else {
        writeln!(writer, "Allocation {id} was already absent")?;
    }
    Ok(())
}
