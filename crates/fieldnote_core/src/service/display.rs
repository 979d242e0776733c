//! Read-only projection of the current entry.

use crate::model::entry::Entry;
use crate::richtext::node::escape_text;

/// Text shown when there is nothing to display.
pub const NO_ENTRIES_PLACEHOLDER: &str = "No entries yet.";

/// What the display pane should show after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDisplay {
    /// Empty notebook or cursor out of range.
    Placeholder,
    /// Rendered markup of one entry.
    Entry(String),
}

impl EntryDisplay {
    /// Markup (or placeholder text) for the display pane.
    pub fn as_markup(&self) -> &str {
        match self {
            Self::Placeholder => NO_ENTRIES_PLACEHOLDER,
            Self::Entry(markup) => markup,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Projects an entry for display; `None` yields the placeholder.
///
/// Plain fields are escaped; notes are embedded as stored markup.
pub fn render(entry: Option<&Entry>) -> EntryDisplay {
    let Some(entry) = entry else {
        return EntryDisplay::Placeholder;
    };
    EntryDisplay::Entry(format!(
        "<p><strong>Date:</strong> {}</p>\n\
         <p><strong>Weather:</strong> {}</p>\n\
         <p><strong>Location:</strong> {}</p>\n\
         <div><strong>Notes:</strong><br>{}</div>",
        escape_text(&entry.date),
        escape_text(&entry.weather),
        escape_text(&entry.location),
        entry.notes
    ))
}
