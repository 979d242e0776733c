//! Entry store: CRUD and cursor navigation with durable persistence.
//!
//! # Responsibility
//! - Own `NotebookState` and the storage it is flushed to.
//! - Return the refreshed display after every operation.
//!
//! # Invariants
//! - `save` is upsert-at-cursor: it appends only into an empty notebook.
//! - Every mutating operation is followed by a full-state flush; navigation
//!   never writes.
//! - No operation fails; missing preconditions are `Outcome::Skipped`, and
//!   storage failures are logged while in-memory state stays authoritative.

use crate::guard::{Outcome, SkipReason};
use crate::model::entry::Entry;
use crate::model::notebook::NotebookState;
use crate::service::display::{render, EntryDisplay};
use crate::storage::{KeyValueStore, StorageResult, ENTRIES_KEY};
use log::{debug, error, info, warn};

/// Notebook entries plus cursor, bound to a key-value store.
pub struct EntryStore<S: KeyValueStore> {
    store: S,
    state: NotebookState,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Loads entries from `store`; missing or corrupt data yields an empty
    /// notebook. The cursor starts at the first entry.
    pub fn load(store: S) -> Self {
        let entries = read_entries(&store);
        info!(
            "event=entries_load module=entry_store status=ok count={}",
            entries.len()
        );
        Self {
            store,
            state: NotebookState::with_entries(entries),
        }
    }

    /// Writes `fields` at the cursor (or as the first entry) and persists.
    pub fn save(&mut self, fields: Entry) -> EntryDisplay {
        let was_empty = self.state.is_empty();
        self.state.upsert_current(fields);
        debug!(
            "event=entry_save module=entry_store status=ok mode={} index={}",
            if was_empty { "append" } else { "overwrite" },
            self.state.current_index
        );
        self.flush();
        self.display()
    }

    /// Removes the entry at the cursor and persists.
    pub fn delete(&mut self) -> Outcome<EntryDisplay> {
        if !self.state.remove_current() {
            return self.skipped("entry_delete");
        }
        debug!(
            "event=entry_delete module=entry_store status=ok remaining={} index={}",
            self.state.len(),
            self.state.current_index
        );
        self.flush();
        Outcome::Applied(self.display())
    }

    /// Moves to the previous entry, wrapping to the last one.
    pub fn prev(&mut self) -> Outcome<EntryDisplay> {
        self.navigate("entry_prev", -1)
    }

    /// Moves to the next entry, wrapping to the first one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Outcome<EntryDisplay> {
        self.navigate("entry_next", 1)
    }

    /// Places the cursor at `index`, clamped into range. Does not persist.
    pub fn seek(&mut self, index: usize) -> Outcome<EntryDisplay> {
        if self.state.is_empty() {
            return self.skipped("entry_seek");
        }
        self.state.seek(index);
        Outcome::Applied(self.display())
    }

    /// Current display projection.
    pub fn display(&self) -> EntryDisplay {
        render(self.state.current())
    }

    pub fn current(&self) -> Option<&Entry> {
        self.state.current()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn state(&self) -> &NotebookState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_storage(self) -> S {
        self.store
    }

    fn navigate(&mut self, event: &str, step: isize) -> Outcome<EntryDisplay> {
        if !self.state.step(step) {
            return self.skipped(event);
        }
        debug!(
            "event={event} module=entry_store status=ok index={}",
            self.state.current_index
        );
        Outcome::Applied(self.display())
    }

    fn skipped(&self, event: &str) -> Outcome<EntryDisplay> {
        debug!(
            "event={event} module=entry_store status=skipped reason={}",
            SkipReason::EmptyNotebook
        );
        Outcome::Skipped(SkipReason::EmptyNotebook)
    }

    fn flush(&mut self) {
        if let Err(err) = write_entries(&mut self.store, &self.state.entries) {
            error!(
                "event=entries_flush module=entry_store status=error count={} error={}",
                self.state.len(),
                err
            );
        }
    }
}

fn read_entries(store: &impl KeyValueStore) -> Vec<Entry> {
    let raw = match store.get(ENTRIES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=entries_load module=entry_store status=error error={err}");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Option<Vec<Entry>>>(&raw) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(err) => {
            // Record content is never logged.
            warn!(
                "event=entries_load module=entry_store status=corrupt bytes={} error={}",
                raw.len(),
                err
            );
            Vec::new()
        }
    }
}

fn write_entries(store: &mut impl KeyValueStore, entries: &[Entry]) -> StorageResult<()> {
    let serialized = serde_json::to_string(entries)?;
    store.set(ENTRIES_KEY, &serialized)
}
