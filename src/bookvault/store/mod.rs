//! # Storage Layer
//!
//! The [`DataStore`] trait is the only way records are read or written. The
//! API and command layers are generic over it, so business logic runs the
//! same against the file backend and the in-memory backend used in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one JSON array in `records.json`
//!   under the data directory.
//! - [`memory::InMemoryStore`]: no persistence, for tests.
//!
//! ## Ordering
//!
//! Stores keep records in insertion order. Saving an existing id replaces the
//! record in place, so edits never reorder the catalog.
//!
//! ```text
//! <data-dir>/
//! ├── records.json   # JSON array of records
//! └── config.json    # VaultConfig
//! ```

use crate::error::Result;
use crate::model::Record;

pub mod fs;
pub mod memory;

/// Abstract interface for record storage.
pub trait DataStore {
    /// All records, in insertion order.
    fn list_records(&self) -> Result<Vec<Record>>;

    /// A record by id.
    fn get_record(&self, id: &str) -> Result<Record>;

    /// Insert a new record, or replace the one with the same id.
    fn save_record(&mut self, record: &Record) -> Result<()>;

    /// Remove a record permanently.
    fn delete_record(&mut self, id: &str) -> Result<()>;

    /// Swap the whole catalog for `records` (used by import).
    fn replace_all(&mut self, records: Vec<Record>) -> Result<()>;
}

/// Insert-or-replace keeping the position of an existing record.
pub(crate) fn upsert(records: &mut Vec<Record>, record: &Record) {
    match records.iter_mut().find(|r| r.id == record.id) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
}
