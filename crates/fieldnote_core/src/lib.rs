//! Core domain logic for the field notebook.
//! Entry persistence, navigation and rich-text editing live here; hosts only
//! supply storage, an editing surface and prompts.

pub mod config;
pub mod guard;
pub mod logging;
pub mod model;
pub mod richtext;
pub mod service;
pub mod storage;

pub use config::NotebookConfig;
pub use guard::{Outcome, SkipReason};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::entry::Entry;
pub use model::notebook::NotebookState;
pub use richtext::image::{begin_image_upload, FileBlob, FileInput, MemoryFileInput, PendingImage};
pub use richtext::mutator::{
    intercept_click, ClickDisposition, Host, KeyDisposition, RichTextMutator,
};
pub use richtext::node::{Element, Node};
pub use richtext::range::{Position, Range};
pub use richtext::surface::{EditingSurface, MemorySurface, Selection, SelectionAnchor};
pub use service::display::{render, EntryDisplay, NO_ENTRIES_PLACEHOLDER};
pub use service::entry_store::EntryStore;
pub use service::theme::{Theme, ThemePreference};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
