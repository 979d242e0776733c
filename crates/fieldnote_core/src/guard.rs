//! Guard-clause policy for user-initiated actions.
//!
//! # Responsibility
//! - Give every "missing precondition" a name instead of a silent return.
//! - Keep user actions total: they either apply or are skipped, never fail.
//!
//! # Invariants
//! - A skipped action leaves notebook state, storage and surface untouched.
//! - Only the link command turns a skip into a user-facing alert; that
//!   choice lives in the mutator, not here.

use std::fmt::{Display, Formatter};

/// Why a user action was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The notebook holds no entries.
    EmptyNotebook,
    /// The host reports no selection at all.
    NoSelection,
    /// The selection is a caret with nothing highlighted.
    CollapsedSelection,
    /// The selection is anchored outside the editable surface.
    OutsideSurface,
    /// The link prompt was cancelled or answered with an empty URL.
    EmptyUrl,
    /// The style property or value cannot be applied as an inline style.
    InvalidStyle,
    /// The surface did not handle the formatting command.
    UnhandledCommand,
}

impl SkipReason {
    /// Stable identifier used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyNotebook => "empty_notebook",
            Self::NoSelection => "no_selection",
            Self::CollapsedSelection => "collapsed_selection",
            Self::OutsideSurface => "outside_surface",
            Self::EmptyUrl => "empty_url",
            Self::InvalidStyle => "invalid_style",
            Self::UnhandledCommand => "unhandled_command",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a user action that cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Applied(T),
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Returns the skip reason, or `None` when the action applied.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Applied(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }

    /// Converts into the applied value, dropping the skip reason.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Applied(value) => Outcome::Applied(f(value)),
            Self::Skipped(reason) => Outcome::Skipped(reason),
        }
    }
}
