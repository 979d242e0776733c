//! Editing surface contract and its in-memory implementation.
//!
//! # Responsibility
//! - Describe the capabilities the mutator needs from a live editor.
//! - Provide `MemorySurface`, a tree-backed surface usable without a
//!   rendering engine.
//!
//! # Invariants
//! - Mutating calls never leave unbalanced markup behind.
//! - A selection anchored outside the surface is reported, never mutated.

use super::command::FormatCommand;
use super::markup::parse_markup;
use super::node::{Element, Node};
use super::range::{self, Position, Range};

/// Where the host's current selection is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAnchor {
    /// Inside the designated editable surface.
    Surface,
    /// Somewhere else in the host (another field, the display pane).
    Outside,
}

/// The host's current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub range: Range,
    pub anchor: SelectionAnchor,
}

impl Selection {
    pub fn inside(range: Range) -> Self {
        Self {
            range,
            anchor: SelectionAnchor::Surface,
        }
    }

    pub fn outside(range: Range) -> Self {
        Self {
            range,
            anchor: SelectionAnchor::Outside,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.range.is_collapsed()
    }
}

/// Capabilities the rich-text mutator needs from an editable surface.
pub trait EditingSurface {
    /// Current host selection, or `None` when nothing is selected anywhere.
    fn selection(&self) -> Option<Selection>;
    /// Whether the selection lies entirely within this surface.
    fn contains(&self, selection: &Selection) -> bool;
    /// Cuts the range into a detached fragment; returns the fragment and the
    /// boundary where it used to start.
    fn extract_range(&mut self, range: &Range) -> Option<(Vec<Node>, Position)>;
    /// Deletes the range; returns the boundary where it used to start.
    fn delete_range(&mut self, range: &Range) -> Option<Position> {
        self.extract_range(range).map(|(_, at)| at)
    }
    /// Inserts `node` at `at`; returns the boundary right after it.
    fn insert_node(&mut self, at: &Position, node: Node) -> Option<Position>;
    /// Replaces the selection with a caret at `at` inside the surface.
    fn collapse_selection_at(&mut self, at: Position);
    /// Applies the named formatting command to the current selection with no
    /// further arguments. Returns `false` when the surface did not handle it.
    fn apply_format(&mut self, command: &str) -> bool;
    /// Serialized markup of the surface content.
    fn markup(&self) -> String;
}

/// Tree-backed editable surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    root: Element,
    selection: Option<Selection>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            root: Element::new("div").with_attr("id", "notes"),
            selection: None,
        }
    }

    /// Builds a surface holding previously saved notes.
    pub fn from_markup(markup: &str) -> Self {
        let mut surface = Self::new();
        surface.load_markup(markup);
        surface
    }

    /// Replaces content with parsed `markup` and clears the selection.
    pub fn load_markup(&mut self, markup: &str) {
        self.root.children = parse_markup(markup);
        self.selection = None;
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Sets the host selection as the user would by dragging.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Selects `range` inside the surface.
    pub fn select(&mut self, range: Range) {
        self.selection = Some(Selection::inside(range));
    }

    /// Selects the first occurrence of `needle` in a single text node.
    ///
    /// Returns `false` when no text node contains it.
    pub fn select_text(&mut self, needle: &str) -> bool {
        match find_text(&self.root, needle, &mut Vec::new()) {
            Some(range) => {
                self.select(range);
                true
            }
            None => false,
        }
    }

    /// Places a caret at the end of the surface content.
    pub fn caret_at_end(&mut self) {
        let at = Position::root(self.root.children.len());
        self.select(Range::caret(at));
    }

    /// Text of the current selection, or `None` when outside or missing.
    pub fn selected_text(&self) -> Option<String> {
        let selection = self.selection.as_ref().filter(|sel| self.contains(sel))?;
        let mut scratch = self.root.clone();
        let (fragment, _) = range::extract(&mut scratch, &selection.range)?;
        Some(fragment.iter().map(Node::text_content).collect())
    }
}

impl EditingSurface for MemorySurface {
    fn selection(&self) -> Option<Selection> {
        self.selection.clone()
    }

    fn contains(&self, selection: &Selection) -> bool {
        selection.anchor == SelectionAnchor::Surface
            && range::resolves(&self.root, &selection.range.start)
            && range::resolves(&self.root, &selection.range.end)
    }

    fn extract_range(&mut self, range: &Range) -> Option<(Vec<Node>, Position)> {
        let extracted = range::extract(&mut self.root, range)?;
        self.selection = Some(Selection::inside(Range::caret(extracted.1.clone())));
        Some(extracted)
    }

    fn insert_node(&mut self, at: &Position, node: Node) -> Option<Position> {
        range::insert(&mut self.root, at, node)
    }

    fn collapse_selection_at(&mut self, at: Position) {
        self.selection = Some(Selection::inside(Range::caret(at)));
    }

    fn apply_format(&mut self, command: &str) -> bool {
        let Some(command) = FormatCommand::from_name(command) else {
            return false;
        };
        let Some(selection) = self.selection.clone() else {
            return false;
        };
        if selection.is_collapsed() || !self.contains(&selection) {
            return false;
        }
        let Some((fragment, at)) = range::extract(&mut self.root, &selection.range) else {
            return false;
        };
        let wrapper = Element::new(command.tag()).with_children(fragment);
        let Some(after) = range::insert(&mut self.root, &at, wrapper.into()) else {
            return false;
        };
        // The formatted run stays selected, as hosts do after a toggle.
        let before = Position::new(after.path.clone(), after.offset.saturating_sub(1));
        self.select(Range::new(before, after));
        true
    }

    fn markup(&self) -> String {
        self.root.inner_markup()
    }
}

fn find_text(element: &Element, needle: &str, path: &mut Vec<usize>) -> Option<Range> {
    if needle.is_empty() {
        return None;
    }
    for (index, child) in element.children.iter().enumerate() {
        path.push(index);
        let found = match child {
            Node::Text(text) => text.find(needle).map(|byte| {
                let start = text[..byte].chars().count();
                let end = start + needle.chars().count();
                Range::new(
                    Position::new(path.clone(), start),
                    Position::new(path.clone(), end),
                )
            }),
            Node::Element(inner) => find_text(inner, needle, path),
        };
        path.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}
