//! Runtime configuration for notebook hosts.
//!
//! # Responsibility
//! - Resolve where records are stored and how logging is set up.
//!
//! # Invariants
//! - Resolution never fails; unset or blank inputs fall back to defaults.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the storage file location.
pub const DB_PATH_ENV: &str = "FIELDNOTE_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "fieldnote.sqlite3";

/// Settings a host needs before opening the notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookConfig {
    /// SQLite file holding the key-value records.
    pub storage_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl NotebookConfig {
    /// Applies optional overrides on top of the defaults.
    pub fn resolve(
        storage_path: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            storage_path: storage_path.unwrap_or(defaults.storage_path),
            log_level: log_level
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_dir,
        }
    }
}

/// `FIELDNOTE_DB_PATH` when set, otherwise a file in the temp directory.
pub fn default_storage_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
