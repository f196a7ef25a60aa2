//! Error types for contactbox.
//!
//! This module defines all error types used throughout the contactbox crate.
//! Storage read/write failures are mostly swallowed by the record store and
//! only logged; everything else propagates to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for contactbox operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The stored value under a key could not be read back as records.
    #[error("failed to read storage slot '{key}': {message}")]
    StorageRead {
        /// The storage key.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A value could not be written to a storage slot.
    #[error("failed to write storage slot '{key}': {message}")]
    StorageWrite {
        /// The storage key.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A write would exceed the configured storage quota.
    #[error("storage quota exceeded for '{key}': {size} bytes > {quota} bytes")]
    QuotaExceeded {
        /// The storage key.
        key: String,
        /// Size of the value that was rejected.
        size: usize,
        /// Configured quota in bytes.
        quota: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Form Errors ===
    /// A `name=value` field argument could not be parsed.
    #[error("invalid form field '{input}': expected name=value")]
    InvalidField {
        /// The raw argument.
        input: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for contactbox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a storage read error for the given key.
    #[must_use]
    pub fn storage_read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageRead {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a storage write error for the given key.
    #[must_use]
    pub fn storage_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageWrite {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from reading a storage slot.
    #[must_use]
    pub fn is_storage_read(&self) -> bool {
        matches!(self, Self::StorageRead { .. })
    }

    /// Check if this error came from writing a storage slot.
    #[must_use]
    pub fn is_storage_write(&self) -> bool {
        matches!(self, Self::StorageWrite { .. } | Self::QuotaExceeded { .. })
    }
}
