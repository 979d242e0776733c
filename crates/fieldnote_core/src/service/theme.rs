//! Theme preference persisted in the `theme` record.

use crate::storage::{KeyValueStore, StorageResult, THEME_KEY};
use log::warn;

const DEFAULT_THEME_ID: &str = "default";

/// Selected colour theme.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Theme {
    /// No `data-theme` attribute on the document root.
    #[default]
    Default,
    Named(String),
}

impl Theme {
    /// Parses a stored or user-chosen identifier; blank means default.
    pub fn from_id(id: &str) -> Self {
        match id.trim() {
            "" | DEFAULT_THEME_ID => Self::Default,
            other => Self::Named(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Default => DEFAULT_THEME_ID,
            Self::Named(name) => name,
        }
    }

    /// Value for the root `data-theme` attribute; `None` removes it.
    pub fn data_attribute(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(name) => Some(name),
        }
    }
}

/// Loads and saves the theme record.
pub struct ThemePreference;

impl ThemePreference {
    /// Reads the stored theme; a missing or unreadable record is `Default`.
    pub fn load(store: &impl KeyValueStore) -> Theme {
        match store.get(THEME_KEY) {
            Ok(Some(id)) => Theme::from_id(&id),
            Ok(None) => Theme::Default,
            Err(err) => {
                warn!("event=theme_load module=theme status=error error={err}");
                Theme::Default
            }
        }
    }

    pub fn save(store: &mut impl KeyValueStore, theme: &Theme) -> StorageResult<()> {
        store.set(THEME_KEY, theme.id())
    }
}
