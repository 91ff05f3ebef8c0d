//! CLI command implementations.

pub mod allocate;
pub mod conflicts;
pub mod events;
pub mod report;
pub mod resources;
pub mod status;
pub mod util;
