//! Durable key-value records backing the notebook.
//!
//! # Responsibility
//! - Define the string-record contract shared by every storage backend.
//! - Name the two records the notebook persists.
//!
//! # Invariants
//! - Values are opaque strings; interpretation belongs to callers.
//! - `set` replaces the whole record (no partial writes).

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use schema::schema_version;
pub use sqlite::SqliteStore;

/// Record holding the selected theme identifier.
pub const THEME_KEY: &str = "theme";
/// Record holding the JSON array of notebook entries.
pub const ENTRIES_KEY: &str = "fieldEntries";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer failure.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The database was written by a build with a newer record schema.
    SchemaTooNew {
        found: u32,
        supported: u32,
    },
    Serialization(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "record schema version {found} is newer than supported {supported}"
            ),
            Self::Serialization(err) => write!(f, "record serialization failed: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Named string records with whole-value replacement.
pub trait KeyValueStore {
    /// Reads one record; `Ok(None)` when the record was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes one record, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
