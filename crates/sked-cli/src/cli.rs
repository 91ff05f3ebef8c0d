//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sked_core::ResourceType;

/// Event scheduling and resource allocation.
///
/// Manages events and bookable resources (rooms, instructors, equipment)
/// and refuses any allocation that would double-book a resource.
#[derive(Debug, Parser)]
#[command(name = "sked", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage events.
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Manage resources.
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Allocate resources to an event, rejecting time conflicts.
    Allocate {
        /// The event to book resources for.
        #[arg(long)]
        event: String,

        /// Resource ID to allocate; may be given multiple times.
        #[arg(long = "resource", required = true)]
        resources: Vec<String>,
    },

    /// Remove a resource allocation.
    Deallocate {
        /// The allocation ID to remove.
        allocation: String,
    },

    /// List every double-booked resource pair in the store.
    Conflicts {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resource utilization over a date range.
    Report {
        /// The resource to report on.
        #[arg(long)]
        resource: String,

        /// Range start (inclusive), RFC 3339 or YYYY-MM-DD.
        #[arg(long)]
        start: String,

        /// Range end (exclusive), RFC 3339 or YYYY-MM-DD.
        #[arg(long)]
        end: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show store counts and recent events.
    Status,
}

/// Event management actions.
#[derive(Debug, Subcommand)]
pub enum EventAction {
    /// Create an event.
    Add {
        /// Event title.
        #[arg(long)]
        title: String,

        /// Start instant, RFC 3339 or YYYY-MM-DDTHH:MM (UTC).
        #[arg(long)]
        start: String,

        /// End instant, exclusive; must be after start.
        #[arg(long)]
        end: String,

        /// Optional description.
        #[arg(long)]
        description: Option<String>,
    },

    /// List all events with their allocated resources.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Edit an event; omitted fields keep their current value.
    Edit {
        /// The event ID to edit.
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an event and its allocations.
    Delete {
        /// The event ID to delete.
        id: String,
    },
}

/// Resource management actions.
#[derive(Debug, Subcommand)]
pub enum ResourceAction {
    /// Create a resource.
    Add {
        /// Resource name, e.g. "Room A".
        #[arg(long)]
        name: String,

        /// Resource type: room, instructor, or equipment.
        #[arg(long = "type")]
        kind: ResourceType,
    },

    /// List all resources, grouped by type.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Edit a resource; omitted fields keep their current value.
    Edit {
        /// The resource ID to edit.
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type")]
        kind: Option<ResourceType>,
    },

    /// Delete a resource and its allocations.
    Delete {
        /// The resource ID to delete.
        id: String,
    },
}
