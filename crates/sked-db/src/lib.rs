//! Storage layer and allocation engine for the resource scheduler.
//!
//! Provides persistence for events, resources, and allocations using
//! `rusqlite`, plus the conflict-checking operations built on top of the
//! pure functions in `sked-core`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. A `Database` instance can be moved between threads but cannot
//! be shared across threads without external synchronization. The
//! check-then-write sequence in [`Database::allocate`] runs inside a single
//! SQLite transaction, so concurrent writers on separate connections are
//! serialized by the storage engine rather than by this crate.
//!
//! # Schema
//!
//! Timestamps are stored as TEXT in RFC 3339 format (e.g.
//! `2025-03-01T09:00:00.000Z`) so that lexicographic ordering matches
//! chronological ordering. Foreign keys are enforced (`PRAGMA foreign_keys`)
//! and deleting an event or resource cascades to its allocations. The
//! `allocations` table carries a unique (event, resource) index as a backstop
//! against duplicate commitments.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use uuid::Uuid;

use sked_core::{
    Allocation, AllocationId, ConflictPair, Event, EventId, InvalidSpan, Resource, ResourceId,
    ResourceType, TimeSpan, Utilization, ValidationError, conflict_pairs, overlapping,
    utilization,
};

/// Database and allocation-engine errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    /// An event time window is empty or inverted.
    #[error("invalid event window: {0}")]
    InvalidEvent(#[source] InvalidSpan),
    /// A report range is empty or inverted.
    #[error("invalid report range: {0}")]
    InvalidRange(#[source] InvalidSpan),
    /// The proposed booking overlaps existing commitments of the resource.
    #[error("resource \"{resource_name}\" is already booked for {}", blocking_summary(.blocking))]
    Conflict {
        resource_name: String,
        /// Every existing event of the resource that overlaps the proposal.
        blocking: Vec<Event>,
    },
    /// The (event, resource) pair is already allocated.
    #[error("resource {resource_id} is already allocated to event {event_id}")]
    DuplicateAllocation {
        event_id: EventId,
        resource_id: ResourceId,
    },
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for row {row_id}: {timestamp}")]
    TimestampParse {
        row_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored row holds data the domain types reject.
    #[error("invalid row {row_id}: {message}")]
    InvalidRow { row_id: String, message: String },
}

fn blocking_summary(blocking: &[Event]) -> String {
    let items: Vec<String> = blocking
        .iter()
        .map(|event| {
            format!(
                "\"{}\" ({} - {})",
                event.title,
                format_timestamp(event.span.start()),
                format_timestamp(event.span.end()),
            )
        })
        .collect();
    items.join(", ")
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidRow {
            row_id: String::new(),
            message: err.to_string(),
        }
    }
}

/// Summary counts for the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub events: usize,
    pub resources: usize,
    pub allocations: usize,
}

/// Database connection wrapper.
///
/// The handle is opened by the caller at process start and passed to
/// whatever needs it; there is no global connection. See the
/// [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

#[derive(Debug)]
struct EventRow {
    id: String,
    title: String,
    description: Option<String>,
    start_time: String,
    end_time: String,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            -- Events table: scheduled events with half-open time windows
            -- start_time/end_time: RFC 3339 TEXT, start strictly before end
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_start ON events(start_time);

            CREATE TABLE IF NOT EXISTS resources (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                type TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_resources_type_name ON resources(type, name);

            -- Allocations: join records committing a resource to an event
            CREATE TABLE IF NOT EXISTS allocations (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                resource_id TEXT NOT NULL,
                FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE,
                FOREIGN KEY (resource_id) REFERENCES resources(id) ON DELETE CASCADE,
                UNIQUE (event_id, resource_id)
            );

            CREATE INDEX IF NOT EXISTS idx_allocations_resource ON allocations(resource_id);
            CREATE INDEX IF NOT EXISTS idx_allocations_event ON allocations(event_id);
            ",
        )?;
        Ok(())
    }

    // ========== Events ==========

    /// Creates an event, rejecting empty or inverted time windows.
    pub fn create_event(
        &mut self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<&str>,
    ) -> Result<Event, DbError> {
        let span = TimeSpan::new(start, end).map_err(DbError::InvalidEvent)?;
        let event = Event {
            id: EventId::new(Uuid::new_v4().to_string())?,
            title: title.to_string(),
            description: description.map(str::to_string),
            span,
        };
        self.conn.execute(
            "INSERT INTO events (id, title, description, start_time, end_time) VALUES (?, ?, ?, ?, ?)",
            params![
                event.id.as_str(),
                event.title,
                event.description,
                format_timestamp(span.start()),
                format_timestamp(span.end()),
            ],
        )?;
        tracing::debug!(id = %event.id, title = %event.title, "event created");
        Ok(event)
    }

    /// Fetches a single event by id.
    pub fn get_event(&self, id: &EventId) -> Result<Event, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, title, description, start_time, end_time FROM events WHERE id = ?",
                [id.as_str()],
                map_event_row,
            )
            .optional()?;
        match row {
            Some(row) => event_from_row(row),
            None => Err(DbError::NotFound {
                kind: "event",
                id: id.to_string(),
            }),
        }
    }

    /// Lists all events ordered by start time then id.
    pub fn list_events(&self) -> Result<Vec<Event>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, title, description, start_time, end_time
            FROM events
            ORDER BY start_time ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], map_event_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(event_from_row(row?)?);
        }
        Ok(events)
    }

    /// Lists the most recently starting events, newest first.
    pub fn recent_events(&self, limit: usize) -> Result<Vec<Event>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, title, description, start_time, end_time
            FROM events
            ORDER BY start_time DESC, id ASC
            LIMIT ?
            ",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map([limit], map_event_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(event_from_row(row?)?);
        }
        Ok(events)
    }

    /// Updates an event, re-validating its window.
    ///
    /// When the time window changes, every resource already allocated to
    /// this event is re-checked against its other bookings; the update is
    /// rejected with [`DbError::Conflict`] if the new window would
    /// double-book any of them. The check and the write happen in one
    /// transaction.
    pub fn update_event(
        &mut self,
        id: &EventId,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<&str>,
    ) -> Result<Event, DbError> {
        let span = TimeSpan::new(start, end).map_err(DbError::InvalidEvent)?;
        let tx = self.conn.transaction()?;

        let current = get_event_tx(&tx, id)?;
        if span != current.span {
            for (resource, _) in allocations_for_event_tx(&tx, id)? {
                let bookings: Vec<Event> = allocations_for_resource_tx(&tx, &resource.id)?
                    .into_iter()
                    .map(|(event, _)| event)
                    .filter(|event| event.id != *id)
                    .collect();
                let blocking: Vec<Event> =
                    overlapping(span, &bookings).into_iter().cloned().collect();
                if !blocking.is_empty() {
                    tracing::debug!(
                        event = %id,
                        resource = %resource.id,
                        blocking = blocking.len(),
                        "event update rejected"
                    );
                    return Err(DbError::Conflict {
                        resource_name: resource.name,
                        blocking,
                    });
                }
            }
        }

        tx.execute(
            "UPDATE events SET title = ?, description = ?, start_time = ?, end_time = ? WHERE id = ?",
            params![
                title,
                description,
                format_timestamp(span.start()),
                format_timestamp(span.end()),
                id.as_str(),
            ],
        )?;
        tx.commit()?;
        Ok(Event {
            id: id.clone(),
            title: title.to_string(),
            description: description.map(str::to_string),
            span,
        })
    }

    /// Deletes an event; its allocations are removed by the cascade.
    pub fn delete_event(&mut self, id: &EventId) -> Result<(), DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id.as_str()])?;
        if deleted == 0 {
            return Err(DbError::NotFound {
                kind: "event",
                id: id.to_string(),
            });
        }
        tracing::debug!(id = %id, "event deleted");
        Ok(())
    }

    // ========== Resources ==========

    /// Creates a resource.
    pub fn create_resource(
        &mut self,
        name: &str,
        kind: ResourceType,
    ) -> Result<Resource, DbError> {
        let resource = Resource {
            id: ResourceId::new(Uuid::new_v4().to_string())?,
            name: name.to_string(),
            kind,
        };
        self.conn.execute(
            "INSERT INTO resources (id, name, type) VALUES (?, ?, ?)",
            params![resource.id.as_str(), resource.name, kind.as_str()],
        )?;
        tracing::debug!(id = %resource.id, name = %resource.name, kind = %kind, "resource created");
        Ok(resource)
    }

    /// Fetches a single resource by id.
    pub fn get_resource(&self, id: &ResourceId) -> Result<Resource, DbError> {
        get_resource_tx(&self.conn, id)
    }

    /// Lists all resources ordered by type then name.
    pub fn list_resources(&self) -> Result<Vec<Resource>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, type FROM resources ORDER BY type ASC, name ASC, id ASC",
        )?;
        let rows = stmt.query_map([], map_resource_row)?;
        let mut resources = Vec::new();
        for row in rows {
            let (id, name, kind) = row?;
            resources.push(resource_from_row(id, name, &kind)?);
        }
        Ok(resources)
    }

    /// Updates a resource's name and type.
    pub fn update_resource(
        &mut self,
        id: &ResourceId,
        name: &str,
        kind: ResourceType,
    ) -> Result<Resource, DbError> {
        let updated = self.conn.execute(
            "UPDATE resources SET name = ?, type = ? WHERE id = ?",
            params![name, kind.as_str(), id.as_str()],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound {
                kind: "resource",
                id: id.to_string(),
            });
        }
        Ok(Resource {
            id: id.clone(),
            name: name.to_string(),
            kind,
        })
    }

    /// Deletes a resource; its allocations are removed by the cascade.
    pub fn delete_resource(&mut self, id: &ResourceId) -> Result<(), DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM resources WHERE id = ?", [id.as_str()])?;
        if deleted == 0 {
            return Err(DbError::NotFound {
                kind: "resource",
                id: id.to_string(),
            });
        }
        tracing::debug!(id = %id, "resource deleted");
        Ok(())
    }

    // ========== Allocation store primitives ==========

    /// All current commitments of a resource, ordered by event start.
    pub fn allocations_for_resource(
        &self,
        resource_id: &ResourceId,
    ) -> Result<Vec<(Event, Allocation)>, DbError> {
        allocations_for_resource_tx(&self.conn, resource_id)
    }

    /// Resources currently booked to an event, ordered by resource name.
    pub fn allocations_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<(Resource, Allocation)>, DbError> {
        allocations_for_event_tx(&self.conn, event_id)
    }

    /// Inserts the join record without any conflict check.
    ///
    /// This is the raw store primitive; [`Database::allocate`] is the guarded
    /// entry point. Fails with [`DbError::NotFound`] if either endpoint is
    /// absent and [`DbError::DuplicateAllocation`] if the pair already
    /// exists.
    pub fn create_allocation(
        &mut self,
        event_id: &EventId,
        resource_id: &ResourceId,
    ) -> Result<Allocation, DbError> {
        let tx = self.conn.transaction()?;
        let allocation = create_allocation_tx(&tx, event_id, resource_id)?;
        tx.commit()?;
        Ok(allocation)
    }

    /// Removes an allocation. Idempotent: returns whether a row was removed.
    pub fn delete_allocation(&mut self, id: &AllocationId) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM allocations WHERE id = ?", [id.as_str()])?;
        if deleted > 0 {
            tracing::debug!(id = %id, "allocation removed");
        }
        Ok(deleted > 0)
    }

    /// Fetches a single allocation by id.
    pub fn get_allocation(&self, id: &AllocationId) -> Result<Allocation, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, event_id, resource_id FROM allocations WHERE id = ?",
                [id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        match row {
            Some((id, event_id, resource_id)) => Ok(Allocation {
                id: AllocationId::new(id)?,
                event_id: EventId::new(event_id)?,
                resource_id: ResourceId::new(resource_id)?,
            }),
            None => Err(DbError::NotFound {
                kind: "allocation",
                id: id.to_string(),
            }),
        }
    }

    // ========== Conflict & reporting engine ==========

    /// Allocates a resource to an event after checking for time conflicts.
    ///
    /// Loads the event, fetches the resource's existing bookings, and tests
    /// each against the event's window using the half-open overlap rule. Any
    /// overlap rejects the whole request with [`DbError::Conflict`] listing
    /// every blocking event; nothing is written in that case. The read and
    /// the insert share one transaction, so the check-then-act sequence is
    /// never partially applied.
    pub fn allocate(
        &mut self,
        event_id: &EventId,
        resource_id: &ResourceId,
    ) -> Result<Allocation, DbError> {
        let tx = self.conn.transaction()?;

        let event = get_event_tx(&tx, event_id)?;
        let resource = get_resource_tx(&tx, resource_id)?;
        let bookings: Vec<Event> = allocations_for_resource_tx(&tx, resource_id)?
            .into_iter()
            .map(|(event, _)| event)
            .collect();

        let blocking: Vec<Event> = overlapping(event.span, &bookings)
            .into_iter()
            .cloned()
            .collect();
        if !blocking.is_empty() {
            tracing::debug!(
                event = %event_id,
                resource = %resource_id,
                blocking = blocking.len(),
                "allocation rejected"
            );
            return Err(DbError::Conflict {
                resource_name: resource.name,
                blocking,
            });
        }

        let allocation = create_allocation_tx(&tx, event_id, resource_id)?;
        tx.commit()?;
        tracing::debug!(
            id = %allocation.id,
            event = %event_id,
            resource = %resource_id,
            "allocation created"
        );
        Ok(allocation)
    }

    /// Enumerates every pair of allocations double-booking a resource.
    ///
    /// An audit over the whole store: conflicts can only exist here if data
    /// was edited out-of-band, since [`Database::allocate`] refuses to create
    /// them. Each unordered pair is reported once.
    pub fn find_conflicts(&self) -> Result<Vec<ConflictPair>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT a.resource_id, e.id, e.title, e.description, e.start_time, e.end_time
            FROM allocations a
            JOIN events e ON e.id = a.event_id
            ORDER BY a.resource_id ASC, e.start_time ASC, e.id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                EventRow {
                    id: row.get(1)?,
                    title: row.get(2)?,
                    description: row.get(3)?,
                    start_time: row.get(4)?,
                    end_time: row.get(5)?,
                },
            ))
        })?;

        let mut groups: Vec<(ResourceId, Vec<Event>)> = Vec::new();
        for row in rows {
            let (resource_id, event_row) = row?;
            let resource_id = ResourceId::new(resource_id)?;
            let event = event_from_row(event_row)?;
            match groups.last_mut() {
                Some((current, events)) if *current == resource_id => events.push(event),
                _ => groups.push((resource_id, vec![event])),
            }
        }

        Ok(conflict_pairs(&groups))
    }

    /// Computes booked hours for a resource within a half-open date range.
    ///
    /// Bookings intersecting the range count their full duration; see
    /// [`sked_core::utilization`].
    pub fn utilization_report(
        &self,
        resource_id: &ResourceId,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Utilization, DbError> {
        let range = TimeSpan::new(range_start, range_end).map_err(DbError::InvalidRange)?;
        // Surface NotFound before an empty report for a typo'd id.
        let _ = self.get_resource(resource_id)?;
        let bookings: Vec<Event> = self
            .allocations_for_resource(resource_id)?
            .into_iter()
            .map(|(event, _)| event)
            .collect();
        Ok(utilization(&bookings, range))
    }

    /// Row counts for the status summary.
    pub fn counts(&self) -> Result<StoreCounts, DbError> {
        let count = |table: &str| -> Result<usize, rusqlite::Error> {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|n| usize::try_from(n).unwrap_or_default())
        };
        Ok(StoreCounts {
            events: count("events")?,
            resources: count("resources")?,
            allocations: count("allocations")?,
        })
    }
}

// ========== Row mapping helpers ==========

fn map_event_row(row: &rusqlite::Row<'_>) -> Result<EventRow, rusqlite::Error> {
    Ok(EventRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
    })
}

fn event_from_row(row: EventRow) -> Result<Event, DbError> {
    let start = parse_timestamp(&row.start_time, &row.id)?;
    let end = parse_timestamp(&row.end_time, &row.id)?;
    let span = TimeSpan::new(start, end).map_err(DbError::InvalidEvent)?;
    Ok(Event {
        id: EventId::new(row.id)?,
        title: row.title,
        description: row.description,
        span,
    })
}

fn map_resource_row(row: &rusqlite::Row<'_>) -> Result<(String, String, String), rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn resource_from_row(id: String, name: String, kind: &str) -> Result<Resource, DbError> {
    let kind: ResourceType = kind.parse().map_err(|err| DbError::InvalidRow {
        row_id: id.clone(),
        message: format!("{err}"),
    })?;
    Ok(Resource {
        id: ResourceId::new(id)?,
        name,
        kind,
    })
}

fn parse_timestamp(timestamp: &str, row_id: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            row_id: row_id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ========== Shared queries (work on both Connection and Transaction) ==========

fn get_event_tx(conn: &Connection, id: &EventId) -> Result<Event, DbError> {
    let row = conn
        .query_row(
            "SELECT id, title, description, start_time, end_time FROM events WHERE id = ?",
            [id.as_str()],
            map_event_row,
        )
        .optional()?;
    match row {
        Some(row) => event_from_row(row),
        None => Err(DbError::NotFound {
            kind: "event",
            id: id.to_string(),
        }),
    }
}

fn get_resource_tx(conn: &Connection, id: &ResourceId) -> Result<Resource, DbError> {
    let row = conn
        .query_row(
            "SELECT id, name, type FROM resources WHERE id = ?",
            [id.as_str()],
            map_resource_row,
        )
        .optional()?;
    match row {
        Some((id, name, kind)) => resource_from_row(id, name, &kind),
        None => Err(DbError::NotFound {
            kind: "resource",
            id: id.to_string(),
        }),
    }
}

fn allocations_for_resource_tx(
    conn: &Connection,
    resource_id: &ResourceId,
) -> Result<Vec<(Event, Allocation)>, DbError> {
    let mut stmt = conn.prepare(
        "
        SELECT e.id, e.title, e.description, e.start_time, e.end_time, a.id
        FROM allocations a
        JOIN events e ON e.id = a.event_id
        WHERE a.resource_id = ?
        ORDER BY e.start_time ASC, e.id ASC
        ",
    )?;
    let rows = stmt.query_map([resource_id.as_str()], |row| {
        Ok((
            EventRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                start_time: row.get(3)?,
                end_time: row.get(4)?,
            },
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut allocations = Vec::new();
    for row in rows {
        let (event_row, allocation_id) = row?;
        let event = event_from_row(event_row)?;
        let allocation = Allocation {
            id: AllocationId::new(allocation_id)?,
            event_id: event.id.clone(),
            resource_id: resource_id.clone(),
        };
        allocations.push((event, allocation));
    }
    Ok(allocations)
}

fn allocations_for_event_tx(
    conn: &Connection,
    event_id: &EventId,
) -> Result<Vec<(Resource, Allocation)>, DbError> {
    let mut stmt = conn.prepare(
        "
        SELECT r.id, r.name, r.type, a.id
        FROM allocations a
        JOIN resources r ON r.id = a.resource_id
        WHERE a.event_id = ?
        ORDER BY r.name ASC, r.id ASC
        ",
    )?;
    let rows = stmt.query_map([event_id.as_str()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut allocations = Vec::new();
    for row in rows {
        let (resource_id, name, kind, allocation_id) = row?;
        let resource = resource_from_row(resource_id, name, &kind)?;
        let allocation = Allocation {
            id: AllocationId::new(allocation_id)?,
            event_id: event_id.clone(),
            resource_id: resource.id.clone(),
        };
        allocations.push((resource, allocation));
    }
    Ok(allocations)
}

fn create_allocation_tx(
    conn: &Connection,
    event_id: &EventId,
    resource_id: &ResourceId,
) -> Result<Allocation, DbError> {
    // Explicit endpoint checks so absence surfaces as NotFound rather than
    // a foreign-key failure.
    let _ = get_event_tx(conn, event_id)?;
    let _ = get_resource_tx(conn, resource_id)?;

    let existing: Option<String> = conn
        .query_row(
            "SELECT id FROM allocations WHERE event_id = ? AND resource_id = ?",
            [event_id.as_str(), resource_id.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Err(DbError::DuplicateAllocation {
            event_id: event_id.clone(),
            resource_id: resource_id.clone(),
        });
    }

    let allocation = Allocation {
        id: AllocationId::new(Uuid::new_v4().to_string())?,
        event_id: event_id.clone(),
        resource_id: resource_id.clone(),
    };
    conn.execute(
        "INSERT INTO allocations (id, event_id, resource_id) VALUES (?, ?, ?)",
        params![
            allocation.id.as_str(),
            event_id.as_str(),
            resource_id.as_str(),
        ],
    )?;
    Ok(allocation)
}
