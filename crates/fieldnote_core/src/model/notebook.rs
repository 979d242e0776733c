//! Notebook state: the entry list plus the cursor.
//!
//! # Responsibility
//! - Hold entries and `current_index` as one explicit value.
//! - Implement the pure list/cursor arithmetic used by `EntryStore`.
//!
//! # Invariants
//! - Non-empty: `current_index < entries.len()`.
//! - Empty: `current_index == 0` and is never used to index.

use super::entry::Entry;
use serde::{Deserialize, Serialize};

/// Ordered entries and the position currently shown/edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookState {
    pub entries: Vec<Entry>,
    pub current_index: usize,
}

impl NotebookState {
    /// Builds a state with the cursor at the first entry.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            current_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry under the cursor, or `None` when empty or out of range.
    pub fn current(&self) -> Option<&Entry> {
        self.entries.get(self.current_index)
    }

    /// Upsert-at-cursor: appends into an empty list, otherwise overwrites.
    pub fn upsert_current(&mut self, entry: Entry) {
        if self.entries.is_empty() {
            self.entries.push(entry);
            self.current_index = 0;
            return;
        }
        let index = self.current_index.min(self.entries.len() - 1);
        self.current_index = index;
        self.entries[index] = entry;
    }

    /// Removes the entry under the cursor. Returns `false` when empty.
    pub fn remove_current(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let index = self.current_index.min(self.entries.len() - 1);
        self.entries.remove(index);
        self.current_index = if index >= self.entries.len() {
            self.entries.len().saturating_sub(1)
        } else {
            index
        };
        true
    }

    /// Moves the cursor by `step` with wraparound. Returns `false` when empty.
    pub fn step(&mut self, step: isize) -> bool {
        let len = self.entries.len();
        if len == 0 {
            return false;
        }
        let len = len as isize;
        let current = (self.current_index as isize).rem_euclid(len);
        self.current_index = (current + step).rem_euclid(len) as usize;
        true
    }

    /// Positions the cursor directly, clamping into range.
    pub fn seek(&mut self, index: usize) {
        self.current_index = index.min(self.entries.len().saturating_sub(1));
    }
}
