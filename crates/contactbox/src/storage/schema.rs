//! `SQLite` schema for the key-value store.

use rusqlite::Connection;

use crate::error::Result;

/// Schema version recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// One row per storage key. `updated_at` is an RFC 3339 timestamp.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// Create the `kv` table if needed and stamp the schema version.
///
/// Safe to call on every open.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_KV_TABLE)?;
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    Ok(())
}
