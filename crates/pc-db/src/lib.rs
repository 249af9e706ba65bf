//! Storage layer for punchclock.
//!
//! Provides an append-only event store using `rusqlite`. Events are created
//! and listed; they are never updated or deleted.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 format with millisecond precision
//! (e.g., `2025-03-10T09:00:00.000Z`). Lexicographic ordering matches
//! chronological ordering, which `list_since` relies on.
//!
//! ## Location
//!
//! Latitude, longitude and accuracy are stored as REAL columns. A punch
//! without a reading is stored as the `(0, 0, 0)` sentinel.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use pc_core::{Event, EventId, Location, NewEvent, Status, SubjectId, ValidationError};
use rusqlite::{Connection, params};
use thiserror::Error;
use uuid::Uuid;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse an event timestamp.
    #[error("invalid timestamp for event {event_id}: {timestamp}")]
    TimestampParse {
        event_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored row does not form a valid event.
    #[error("invalid event data for {event_id}: {source}")]
    InvalidEventData {
        event_id: String,
        #[source]
        source: ValidationError,
    },
}

/// The collaborator the session engine reads from.
///
/// Implementations assign identifiers on create. When more events exist than
/// requested, listing keeps the newest ones, so the latest status is always
/// visible to callers.
pub trait EventStore {
    /// Stores a new event and returns it with its assigned id.
    fn create(&mut self, event: NewEvent) -> Result<Event, DbError>;

    /// Returns the `limit` most recent events. Their order is unspecified.
    fn list(&self, limit: usize) -> Result<Vec<Event>, DbError>;

    /// Returns up to `limit` of the most recent events at or after `start`.
    fn list_since(&self, start: DateTime<Utc>, limit: usize) -> Result<Vec<Event>, DbError>;
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
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
        self.conn.execute_batch(
            "
            -- Events table: append-only punch log
            -- timestamp: RFC 3339 UTC with milliseconds
            -- status: 'clocked-in', 'clocked-out', 'on-break' or 'on-lunch'
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                subject TEXT NOT NULL,
                status TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                latitude REAL NOT NULL DEFAULT 0,
                longitude REAL NOT NULL DEFAULT 0,
                accuracy REAL NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp);
            ",
        )?;
        Ok(())
    }
}

impl EventStore for Database {
    fn create(&mut self, event: NewEvent) -> Result<Event, DbError> {
        let id = EventId::new(Uuid::new_v4().to_string()).map_err(|source| {
            DbError::InvalidEventData {
                event_id: String::new(),
                source,
            }
        })?;
        self.conn.execute(
            "
            INSERT INTO events (id, subject, status, timestamp, latitude, longitude, accuracy)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                id.as_str(),
                event.subject.as_str(),
                event.status.as_str(),
                format_timestamp(event.timestamp),
                event.location.latitude,
                event.location.longitude,
                event.location.accuracy,
            ],
        )?;
        tracing::debug!(id = %id, status = %event.status, "event stored");
        Ok(event.with_id(id))
    }

    fn list(&self, limit: usize) -> Result<Vec<Event>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, subject, status, timestamp, latitude, longitude, accuracy
            FROM events
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?
            ",
        )?;
        let rows = stmt.query_map([sql_limit(limit)], row_to_raw)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }

    fn list_since(&self, start: DateTime<Utc>, limit: usize) -> Result<Vec<Event>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, subject, status, timestamp, latitude, longitude, accuracy
            FROM events
            WHERE timestamp >= ?
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?
            ",
        )?;
        let rows = stmt.query_map(params![format_timestamp(start), sql_limit(limit)], row_to_raw)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }
}

/// A row as stored, before validation.
#[derive(Debug)]
struct RawEventRow {
    id: String,
    subject: String,
    status: String,
    timestamp: String,
    latitude: f64,
    longitude: f64,
    accuracy: f64,
}

impl RawEventRow {
    fn into_event(self) -> Result<Event, DbError> {
        let invalid = |source| DbError::InvalidEventData {
            event_id: self.id.clone(),
            source,
        };
        let timestamp = parse_timestamp(&self.timestamp, &self.id)?;
        let status: Status = self.status.parse().map_err(invalid)?;
        let subject = SubjectId::new(self.subject.clone()).map_err(invalid)?;
        let id = EventId::new(self.id.clone()).map_err(invalid)?;
        Ok(Event {
            id,
            subject,
            status,
            timestamp,
            location: Location {
                latitude: self.latitude,
                longitude: self.longitude,
                accuracy: self.accuracy,
            },
        })
    }
}

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEventRow> {
    Ok(RawEventRow {
        id: row.get(0)?,
        subject: row.get(1)?,
        status: row.get(2)?,
        timestamp: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        accuracy: row.get(6)?,
    })
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn parse_timestamp(timestamp: &str, event_id: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            event_id: event_id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
