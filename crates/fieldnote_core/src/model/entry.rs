//! Field entry record.
//!
//! # Invariants
//! - Wire field names match the `fieldEntries` record exactly.
//! - `notes` holds serialized markup captured from the editing surface.

use serde::{Deserialize, Serialize};

/// One dated field-notebook record.
///
/// Missing fields in stored records decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub date: String,
    pub weather: String,
    pub location: String,
    /// Markup body; embedded verbatim when the entry is displayed.
    pub notes: String,
}

impl Entry {
    pub fn new(
        date: impl Into<String>,
        weather: impl Into<String>,
        location: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            weather: weather.into(),
            location: location.into(),
            notes: notes.into(),
        }
    }
}
