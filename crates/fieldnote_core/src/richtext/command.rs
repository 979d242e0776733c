//! Formatting commands `MemorySurface` knows how to apply.
//!
//! Other surfaces receive command names verbatim through
//! `EditingSurface::apply_format` and are free to support more.

/// Inline formatting toggle applied by wrapping the selection in an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormatCommand {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
}

impl FormatCommand {
    /// Maps a toolbar command name. Names are case-sensitive.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            "strikeThrough" => Some(Self::StrikeThrough),
            _ => None,
        }
    }

    pub(crate) fn tag(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::StrikeThrough => "strike",
        }
    }
}
