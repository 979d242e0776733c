//! Selection-scoped mutations over an editing surface.
//!
//! # Responsibility
//! - Wrap the selection in a link or an inline style span.
//! - Replace the selection with an uploaded image.
//! - Own the Enter-key and external-link click policies.
//!
//! # Invariants
//! - Link, image and style edits require a non-collapsed selection inside
//!   the surface; otherwise it is skipped and the surface is left untouched.
//! - Only the link command alerts the user about a skipped precondition.
//! - Formatting commands are passed to the surface by name, unfiltered.
//! - After a structural edit the selection is a caret right after the inserted node.

use super::node::{Element, Node};
use super::range::Position;
use super::surface::{EditingSurface, Selection};
use crate::guard::{Outcome, SkipReason};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NO_SELECTION_MESSAGE: &str = "Please highlight text inside the notes to turn into a link.";
pub const OUTSIDE_SELECTION_MESSAGE: &str = "Selected text must be inside the Notes section.";
pub const URL_PROMPT_MESSAGE: &str = "Enter the URL:";
/// Class marking images inserted from a file upload.
pub const UPLOADED_IMAGE_CLASS: &str = "uploaded";

const LINK_TARGET: &str = "_blank";
const LINK_REL: &str = "noopener noreferrer";

static EXTERNAL_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://\S").expect("valid external url regex"));
static STYLE_PROPERTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid style property regex"));

/// Blocking interaction primitives supplied by the host.
pub trait Host {
    /// One-way notification.
    fn alert(&mut self, message: &str);
    /// Single-line text request; `None` when cancelled.
    fn prompt(&mut self, message: &str) -> Option<String>;
    /// Opens `url` in a new browsing context with no opener and no referrer.
    fn open_isolated(&mut self, url: &str);
}

/// What the host should do with a key press after the mutator saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The mutator handled it; suppress the host default.
    Handled,
    /// Let the host apply its default behaviour.
    PassThrough,
}

/// What the host should do with a click after the mutator saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Navigation cancelled; the link was opened in an isolated context.
    OpenedIsolated,
    PassThrough,
}

/// Applies structural edits to one editing surface.
pub struct RichTextMutator<S: EditingSurface> {
    surface: S,
}

impl<S: EditingSurface> RichTextMutator<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Serialized surface content, as captured into `Entry::notes` on save.
    pub fn markup(&self) -> String {
        self.surface.markup()
    }

    /// Prompts for a URL and wraps the selection in a link to it.
    ///
    /// The selection is checked before prompting, so an invalid selection
    /// alerts without asking for a URL.
    pub fn wrap_selection_in_link(&mut self, host: &mut impl Host) -> Outcome<Position> {
        let selection = match self.link_selection(host) {
            Ok(selection) => selection,
            Err(reason) => return Outcome::Skipped(reason),
        };
        let url = host.prompt(URL_PROMPT_MESSAGE).unwrap_or_default();
        self.link_selection_to(&selection, &url)
    }

    /// Wraps the selection in a link to `url` without prompting.
    pub fn wrap_selection_in_link_to(&mut self, host: &mut impl Host, url: &str) -> Outcome<Position> {
        match self.link_selection(host) {
            Ok(selection) => self.link_selection_to(&selection, url),
            Err(reason) => Outcome::Skipped(reason),
        }
    }

    /// Replaces the selected content with an `<img>` pointing at `image_data`.
    ///
    /// The selected text is discarded. Skips silently without a highlight.
    pub fn insert_image_at_cursor(&mut self, image_data: &str) -> Outcome<Position> {
        let selection = match self.active_selection() {
            Ok(selection) => selection,
            Err(reason) => return self.skipped("image_insert", reason),
        };

        let mut image = Element::new("img").with_attr("src", image_data);
        image.add_class(UPLOADED_IMAGE_CLASS);

        let Some(at) = self.surface.delete_range(&selection.range) else {
            return self.skipped("image_insert", SkipReason::OutsideSurface);
        };
        self.insert_and_collapse("image_insert", &at, image.into())
    }

    /// Wraps the selection in `<span style="property: value;">`.
    ///
    /// `property` must be a CSS-like identifier and `value` must be
    /// non-empty with no `;`, otherwise the call is skipped.
    pub fn wrap_selection_in_style_span(&mut self, property: &str, value: &str) -> Outcome<Position> {
        let selection = match self.active_selection() {
            Ok(selection) => selection,
            Err(reason) => return self.skipped("style_span", reason),
        };
        let Some(style) = inline_style(property, value) else {
            return self.skipped("style_span", SkipReason::InvalidStyle);
        };

        let Some((fragment, at)) = self.surface.extract_range(&selection.range) else {
            return self.skipped("style_span", SkipReason::OutsideSurface);
        };
        let span = Element::new("span")
            .with_attr("style", style)
            .with_children(fragment);
        self.insert_and_collapse("style_span", &at, span.into())
    }

    pub fn change_font_size(&mut self, size: &str) -> Outcome<Position> {
        self.wrap_selection_in_style_span("font-size", size)
    }

    pub fn change_font_family(&mut self, family: &str) -> Outcome<Position> {
        self.wrap_selection_in_style_span("font-family", family)
    }

    /// Hands a formatting command name to the surface unchanged.
    ///
    /// The surface decides what the command does to its current selection;
    /// only a blank name is refused here.
    pub fn format_text(&mut self, command: &str) -> Outcome<()> {
        let command = command.trim();
        if command.is_empty() || !self.surface.apply_format(command) {
            return self.skipped("format_text", SkipReason::UnhandledCommand);
        }
        debug!("event=format_text module=richtext status=ok command={command}");
        Outcome::Applied(())
    }

    /// Enter inside the surface inserts two line breaks at the caret instead
    /// of a new block. Enter anywhere else is left to the host.
    pub fn handle_key(&mut self, key: &str) -> KeyDisposition {
        if key != "Enter" {
            return KeyDisposition::PassThrough;
        }
        let Some(selection) = self
            .surface
            .selection()
            .filter(|selection| self.surface.contains(selection))
        else {
            return KeyDisposition::PassThrough;
        };

        let at = if selection.is_collapsed() {
            Some(selection.range.start.clone())
        } else {
            self.surface.delete_range(&selection.range)
        };
        let after_breaks = at
            .and_then(|at| self.surface.insert_node(&at, Element::new("br").into()))
            .and_then(|at| self.surface.insert_node(&at, Element::new("br").into()));
        if let Some(caret) = after_breaks {
            self.surface.collapse_selection_at(caret);
        }
        KeyDisposition::Handled
    }

    fn link_selection(&self, host: &mut impl Host) -> Result<Selection, SkipReason> {
        self.active_selection().map_err(|reason| {
            let message = if reason == SkipReason::OutsideSurface {
                OUTSIDE_SELECTION_MESSAGE
            } else {
                NO_SELECTION_MESSAGE
            };
            debug!(
                "event=link_wrap module=richtext status=skipped reason={}",
                reason
            );
            host.alert(message);
            reason
        })
    }

    fn link_selection_to(&mut self, selection: &Selection, url: &str) -> Outcome<Position> {
        let url = url.trim();
        if url.is_empty() {
            return self.skipped("link_wrap", SkipReason::EmptyUrl);
        }
        let Some((fragment, at)) = self.surface.extract_range(&selection.range) else {
            return self.skipped("link_wrap", SkipReason::OutsideSurface);
        };
        let anchor = Element::new("a")
            .with_attr("href", url)
            .with_attr("target", LINK_TARGET)
            .with_attr("rel", LINK_REL)
            .with_children(fragment);
        self.insert_and_collapse("link_wrap", &at, anchor.into())
    }

    fn active_selection(&self) -> Result<Selection, SkipReason> {
        let selection = self.surface.selection().ok_or(SkipReason::NoSelection)?;
        if selection.is_collapsed() {
            return Err(SkipReason::CollapsedSelection);
        }
        if !self.surface.contains(&selection) {
            return Err(SkipReason::OutsideSurface);
        }
        Ok(selection)
    }

    fn insert_and_collapse(&mut self, event: &str, at: &Position, node: Node) -> Outcome<Position> {
        match self.surface.insert_node(at, node) {
            Some(after) => {
                self.surface.collapse_selection_at(after.clone());
                debug!("event={event} module=richtext status=ok");
                Outcome::Applied(after)
            }
            None => {
                // Extraction already happened; keep the caret where it was cut.
                self.surface.collapse_selection_at(at.clone());
                self.skipped(event, SkipReason::OutsideSurface)
            }
        }
    }

    fn skipped<T>(&self, event: &str, reason: SkipReason) -> Outcome<T> {
        debug!("event={event} module=richtext status=skipped reason={reason}");
        Outcome::Skipped(reason)
    }
}

/// Redirects activation of external anchors to an isolated context.
pub fn intercept_click(host: &mut impl Host, target: &Element) -> ClickDisposition {
    if target.tag != "a" {
        return ClickDisposition::PassThrough;
    }
    match target.attr("href").filter(|href| is_external_url(href)) {
        Some(href) => {
            host.open_isolated(href);
            ClickDisposition::OpenedIsolated
        }
        None => ClickDisposition::PassThrough,
    }
}

/// Whether `href` is an absolute `http`/`https` URL.
pub fn is_external_url(href: &str) -> bool {
    EXTERNAL_URL_RE.is_match(href.trim())
}

fn inline_style(property: &str, value: &str) -> Option<String> {
    let property = property.trim();
    let value = value.trim();
    let valid_property = STYLE_PROPERTY_RE.is_match(property);
    let valid_value = !value.is_empty() && !value.contains([';', '{', '}']);
    (valid_property && valid_value).then(|| format!("{}: {value};", property.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::{inline_style, is_external_url};

    #[test]
    fn external_urls_need_http_scheme() {
        assert!(is_external_url("https://example.com"));
        assert!(is_external_url("HTTP://example.com/path"));
        assert!(!is_external_url("mailto:a@b.c"));
        assert!(!is_external_url("/relative/path"));
        assert!(!is_external_url("https://"));
    }

    #[test]
    fn inline_style_validates_property_and_value() {
        assert_eq!(
            inline_style("font-size", "18px").as_deref(),
            Some("font-size: 18px;")
        );
        assert_eq!(inline_style("", "18px"), None);
        assert_eq!(inline_style("font size", "18px"), None);
        assert_eq!(inline_style("color", "red; background: x"), None);
        assert_eq!(inline_style("color", "  "), None);
    }
}
