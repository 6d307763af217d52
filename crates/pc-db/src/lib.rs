//! Storage layer for the program coach.
//!
//! Provides a persistent key-value store using `rusqlite`. Completion
//! records and preferences are written through the
//! [`pc_core::KeyValueStore`] trait, so the domain code never sees SQL.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization. The CLI only ever uses
//! it from one thread.
//!
//! # Schema
//!
//! A single `kv` table. Keys are opaque strings chosen by the caller (see
//! `pc_core::completion` for the key scheme). `updated_at` is an ISO 8601
//! UTC timestamp of the last write and exists for inspection only.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use pc_core::KeyValueStore;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub key: String,
    pub value: String,
    pub updated_at: String,
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
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads a single value.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Inserts or replaces a value.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Deletes a value, returning whether a row was removed.
    pub fn delete_value(&mut self, key: &str) -> Result<bool, DbError> {
        let removed = self.conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        Ok(removed > 0)
    }

    /// Lists entries whose key starts with `prefix`, ordered by key.
    pub fn list_prefix(&self, prefix: &str) -> Result<Vec<EntryRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT key, value, updated_at
            FROM kv
            WHERE substr(key, 1, length(?1)) = ?1
            ORDER BY key ASC
            ",
        )?;
        let rows = stmt.query_map([prefix], |row| {
            Ok(EntryRecord {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

impl KeyValueStore for Database {
    type Error = DbError;

    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        self.get_value(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.set_value(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<bool, DbError> {
        self.delete_value(key)
    }
}
