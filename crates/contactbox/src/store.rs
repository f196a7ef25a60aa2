//! The record store: the full list of submitted records kept as one JSON
//! array under a single storage key.
//!
//! `load` and `save` never fail. Read problems fall back to an empty list and
//! write problems leave the previously persisted value in place; both are
//! only logged. Use `try_load` / `try_save` to see the error.

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::storage::{SlotInfo, Storage};

/// Typed view over one storage slot holding a `Vec<Record>`.
#[derive(Debug)]
pub struct RecordStore {
    storage: Storage,
    key: String,
}

impl RecordStore {
    /// Wrap `storage`, reading and writing the slot named `key`.
    #[must_use]
    pub fn new(storage: Storage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Open the store described by `config`: its database file, quota and key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = Storage::open(config.database_path())?.with_quota(config.quota());
        Ok(Self::new(storage, config.storage.key.clone()))
    }

    /// The storage key this store uses.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Load all records, or an empty list if the slot is absent or unreadable.
    #[must_use]
    pub fn load(&self) -> Vec<Record> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                error!("Error loading data from storage: {e}");
                Vec::new()
            }
        }
    }

    /// Load all records, reporting a read failure as an error.
    ///
    /// An absent or empty slot is not an error and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the slot can't be read or doesn't
    /// hold a JSON array of records.
    pub fn try_load(&self) -> Result<Vec<Record>> {
        let raw = self
            .storage
            .get_item(&self.key)
            .map_err(|e| Error::storage_read(&self.key, e.to_string()))?;

        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            debug!("Slot {} is empty", self.key);
            return Ok(Vec::new());
        };

        let records: Vec<Record> = serde_json::from_str(&raw)
            .map_err(|e| Error::storage_read(&self.key, e.to_string()))?;
        debug!("Loaded {} records from {}", records.len(), self.key);
        Ok(records)
    }

    /// Overwrite the slot with `records`. Failures are logged and otherwise
    /// ignored.
    pub fn save(&self, records: &[Record]) {
        if let Err(e) = self.try_save(records) {
            error!("Error saving data to storage: {e}");
        }
    }

    /// Overwrite the slot with `records`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] or [`Error::QuotaExceeded`] if the
    /// value could not be written; the slot then keeps its previous value.
    pub fn try_save(&self, records: &[Record]) -> Result<()> {
        let blob = serde_json::to_string(records)
            .map_err(|e| Error::storage_write(&self.key, e.to_string()))?;

        self.storage
            .set_item(&self.key, &blob)
            .map_err(|e| match e {
                quota @ Error::QuotaExceeded { .. } => quota,
                other => Error::storage_write(&self.key, other.to_string()),
            })?;
        debug!("Saved {} records to {}", records.len(), self.key);
        Ok(())
    }

    /// Load, append `record`, save.
    ///
    /// Returns the list as it was handed to `save`.
    pub fn append(&self, record: Record) -> Vec<Record> {
        let mut records = self.load();
        records.push(record);
        self.save(&records);
        records
    }

    /// Drop the slot entirely.
    ///
    /// Returns `true` if there was anything to drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear(&self) -> Result<bool> {
        let removed = self.storage.remove_item(&self.key)?;
        if !removed {
            warn!("Slot {} was already empty", self.key);
        }
        Ok(removed)
    }

    /// Size and last write time of the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn slot_info(&self) -> Result<Option<SlotInfo>> {
        self.storage.slot_info(&self.key)
    }
}
