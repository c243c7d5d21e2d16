//! SQLite-backed location storage.
//!
//! The `location` table is shared with other features that care about where
//! users are, so this module only ever creates the table and reads or
//! replaces its own rows; nothing here deletes.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::types::{LocationRecord, StoreError};

/// Canonical form of an identity for storage and lookup. Lowercasing happens
/// only here so read and write paths can never disagree on casing.
pub fn canonical_identity(identity: &str) -> String {
    identity.trim().to_lowercase()
}

pub struct LocationStore {
    conn: Mutex<Connection>,
}

impl LocationStore {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// In-memory store for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Idempotent schema creation. Safe to call on every invocation.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.lock().execute(
            "CREATE TABLE IF NOT EXISTS location (
                chan TEXT NOT NULL,
                nick TEXT NOT NULL,
                loc  TEXT NOT NULL,
                lat  REAL NOT NULL,
                lon  REAL NOT NULL,
                PRIMARY KEY (chan, nick)
            )",
            [],
        )?;
        Ok(())
    }

    /// Look up the saved location for an identity in a channel.
    pub fn get(&self, channel: &str, identity: &str) -> Result<Option<LocationRecord>, StoreError> {
        let nick = canonical_identity(identity);
        let record = self
            .conn
            .lock()
            .query_row(
                "SELECT loc, lat, lon FROM location WHERE chan = ?1 AND nick = ?2",
                params![channel, nick],
                |row| {
                    Ok(LocationRecord {
                        channel: channel.to_string(),
                        identity: nick.clone(),
                        address: row.get(0)?,
                        latitude: row.get(1)?,
                        longitude: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Insert or replace the row for (channel, identity).
    pub fn upsert(&self, record: &LocationRecord) -> Result<(), StoreError> {
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO location (chan, nick, loc, lat, lon)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.channel,
                canonical_identity(&record.identity),
                record.address,
                record.latitude,
                record.longitude
            ],
        )?;
        Ok(())
    }
}
