//! Storage layer for contactbox.
//!
//! This module provides a `SQLite`-backed local key-value store: string keys
//! mapped to string values, with an optional byte quota across all slots.

pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Local key-value store.
///
/// Each key holds one text value. Writes overwrite; there is no partial
/// update. When a quota is set, a write that would push the summed size of
/// all values past it is rejected and the previous value is kept.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
    /// Maximum total size of all stored values, in bytes.
    quota: Option<usize>,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        schema::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            path,
            conn,
            quota: None,
        })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
            quota: None,
        })
    }

    /// Set the byte quota. `None` means unlimited.
    #[must_use]
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the configured quota.
    #[must_use]
    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuotaExceeded`] if the write would exceed the quota,
    /// or an error if the database operation fails.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let others = self.bytes_used_excluding(key)?;
            let size = others + value.len();
            if size > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    size,
                    quota,
                });
            }
        }

        self.conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        debug!("Wrote {} bytes to slot {}", value.len(), key);
        Ok(())
    }

    /// Remove the value stored under `key`.
    ///
    /// Returns `true` if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        if removed > 0 {
            info!("Removed slot {}", key);
        }
        Ok(removed > 0)
    }

    /// Describe the slot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn slot_info(&self, key: &str) -> Result<Option<SlotInfo>> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT LENGTH(CAST(value AS BLOB)), updated_at FROM kv WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(row.map(|(size, updated_at)| SlotInfo {
            size_bytes: usize::try_from(size).unwrap_or(0),
            updated_at: DateTime::parse_from_rfc3339(&updated_at)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }))
    }

    /// Total bytes held by all slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn bytes_used(&self) -> Result<usize> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM kv",
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(total).unwrap_or(0))
    }

    fn bytes_used_excluding(&self, key: &str) -> Result<usize> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM kv WHERE key != ?1",
            [key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(total).unwrap_or(0))
    }
}

/// Size and last write time of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    /// Size of the stored value in bytes.
    pub size_bytes: usize,
    /// When the slot was last written.
    pub updated_at: Option<DateTime<Utc>>,
}
