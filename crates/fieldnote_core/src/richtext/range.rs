//! Boundary points, ranges and the tree surgery behind them.
//!
//! A `Position` names a container by its child-index path from the surface
//! root, plus an offset: a character offset when the container is a text
//! node, a child index when it is an element.
//!
//! # Invariants
//! - Extraction and deletion only ever split text nodes and shallow-clone
//!   partially selected elements, so the remaining tree stays balanced.
//! - After extraction the returned position is an element boundary where
//!   the extracted content used to start.

use super::node::{Element, Node};

/// One boundary point inside the surface tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub path: Vec<usize>,
    pub offset: usize,
}

impl Position {
    pub fn new(path: Vec<usize>, offset: usize) -> Self {
        Self { path, offset }
    }

    /// Boundary directly inside the surface root.
    pub fn root(offset: usize) -> Self {
        Self::new(Vec::new(), offset)
    }

    fn order_key(&self) -> Vec<usize> {
        let mut key = self.path.clone();
        key.push(self.offset);
        key
    }
}

/// Start/end pair; may be given backwards by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Caret range at `at`.
    pub fn caret(at: Position) -> Self {
        Self {
            start: at.clone(),
            end: at,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns the range with start before end in document order.
    pub fn ordered(&self) -> Self {
        if self.end.order_key() < self.start.order_key() {
            Self::new(self.end.clone(), self.start.clone())
        } else {
            self.clone()
        }
    }
}

pub(crate) fn node_at<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Node> {
    let (&last, parents) = path.split_last()?;
    element_at(root, parents)?.children.get(last)
}

pub(crate) fn element_at<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    let mut current = root;
    for &index in path {
        match current.children.get(index)? {
            Node::Element(child) => current = child,
            Node::Text(_) => return None,
        }
    }
    Some(current)
}

pub(crate) fn element_at_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    let mut current = root;
    for &index in path {
        match current.children.get_mut(index)? {
            Node::Element(child) => current = child,
            Node::Text(_) => return None,
        }
    }
    Some(current)
}

/// Whether `position` names an existing container and an in-bounds offset.
pub(crate) fn resolves(root: &Element, position: &Position) -> bool {
    if position.path.is_empty() {
        return position.offset <= root.children.len();
    }
    match node_at(root, &position.path) {
        Some(Node::Text(text)) => position.offset <= text.chars().count(),
        Some(Node::Element(element)) => {
            !element.is_void() && position.offset <= element.children.len()
        }
        None => false,
    }
}

/// Turns a boundary into an element boundary, splitting a text node when the
/// point falls strictly inside it. Returns the new position and, when a
/// split happened, the `(parent, index)` of the inserted tail node.
fn split_boundary(
    root: &mut Element,
    position: &Position,
) -> Option<(Position, Option<(Vec<usize>, usize)>)> {
    let Some((&index, parent_path)) = position.path.split_last() else {
        return Some((position.clone(), None));
    };
    let parent = element_at_mut(root, parent_path)?;
    let text = match parent.children.get_mut(index)? {
        Node::Element(_) => return Some((position.clone(), None)),
        Node::Text(text) => text,
    };

    let char_len = text.chars().count();
    if position.offset == 0 {
        return Some((Position::new(parent_path.to_vec(), index), None));
    }
    if position.offset >= char_len {
        return Some((Position::new(parent_path.to_vec(), index + 1), None));
    }

    let byte_index = text
        .char_indices()
        .nth(position.offset)
        .map_or(text.len(), |(byte, _)| byte);
    let tail = text.split_off(byte_index);
    parent.children.insert(index + 1, Node::Text(tail));
    Some((
        Position::new(parent_path.to_vec(), index + 1),
        Some((parent_path.to_vec(), index + 1)),
    ))
}

/// Adjusts an element boundary for a node inserted at `parent[index]`.
fn shift_for_insert(position: &mut Position, parent: &[usize], index: usize) {
    let depth = parent.len();
    if position.path.len() > depth && position.path.starts_with(parent) {
        if position.path[depth] >= index {
            position.path[depth] += 1;
        }
    } else if position.path == parent && position.offset >= index {
        position.offset += 1;
    }
}

/// Normalizes both ends of a range into element boundaries.
fn split_range(root: &mut Element, range: &Range) -> Option<(Position, Position)> {
    let range = range.ordered();
    let (mut end, _) = split_boundary(root, &range.end)?;
    let (start, inserted) = split_boundary(root, &range.start)?;
    if let Some((parent, index)) = inserted {
        shift_for_insert(&mut end, &parent, index);
    }
    Some((start, end))
}

/// Cuts the range out of the tree into a detached fragment.
///
/// Partially selected elements stay in the tree and contribute a shallow
/// clone holding their selected part to the fragment.
pub(crate) fn extract(root: &mut Element, range: &Range) -> Option<(Vec<Node>, Position)> {
    if !resolves(root, &range.start) || !resolves(root, &range.end) {
        return None;
    }
    let (start, end) = split_range(root, range)?;

    let common_len = start
        .path
        .iter()
        .zip(&end.path)
        .take_while(|(a, b)| a == b)
        .count();
    let common = start.path[..common_len].to_vec();
    let start_rest = &start.path[common_len..];
    let end_rest = &end.path[common_len..];
    let ancestor = element_at_mut(root, &common)?;

    let mut fragment = Vec::new();
    let insertion = match (start_rest.split_first(), end_rest.split_first()) {
        (None, None) => {
            fragment.extend(drain_children(ancestor, start.offset, end.offset));
            start.offset
        }
        (None, Some((&end_child, end_deeper))) => {
            fragment.extend(drain_children(ancestor, start.offset, end_child));
            fragment.extend(partial_before(ancestor, start.offset, end_deeper, end.offset));
            start.offset
        }
        (Some((&start_child, start_deeper)), None) => {
            fragment.extend(partial_after(ancestor, start_child, start_deeper, start.offset));
            fragment.extend(drain_children(ancestor, start_child + 1, end.offset));
            start_child + 1
        }
        (Some((&start_child, start_deeper)), Some((&end_child, end_deeper))) => {
            fragment.extend(partial_after(ancestor, start_child, start_deeper, start.offset));
            fragment.extend(drain_children(ancestor, start_child + 1, end_child));
            fragment.extend(partial_before(
                ancestor,
                start_child + 1,
                end_deeper,
                end.offset,
            ));
            start_child + 1
        }
    };

    Some((fragment, Position::new(common, insertion)))
}

/// Inserts `node` at `at`, splitting a text container if needed. Returns the
/// boundary immediately after the inserted node.
pub(crate) fn insert(root: &mut Element, at: &Position, node: Node) -> Option<Position> {
    if !resolves(root, at) {
        return None;
    }
    let (at, _) = split_boundary(root, at)?;
    let container = element_at_mut(root, &at.path)?;
    let index = at.offset.min(container.children.len());
    container.children.insert(index, node);
    Some(Position::new(at.path, index + 1))
}

fn drain_children(element: &mut Element, from: usize, to: usize) -> Vec<Node> {
    let len = element.children.len();
    let to = to.min(len);
    let from = from.min(to);
    element.children.drain(from..to).collect()
}

/// Shallow clone of `element.children[index]` holding everything after the
/// boundary `(deeper, offset)` inside it.
fn partial_after(element: &mut Element, index: usize, deeper: &[usize], offset: usize) -> Option<Node> {
    let Some(Node::Element(child)) = element.children.get_mut(index) else {
        return None;
    };
    let mut clone = child.shallow_clone();
    clone.children = extract_after(child, deeper, offset);
    Some(Node::Element(clone))
}

/// Shallow clone of `element.children[index]` holding everything before the
/// boundary `(deeper, offset)` inside it.
fn partial_before(element: &mut Element, index: usize, deeper: &[usize], offset: usize) -> Option<Node> {
    let Some(Node::Element(child)) = element.children.get_mut(index) else {
        return None;
    };
    let mut clone = child.shallow_clone();
    clone.children = extract_before(child, deeper, offset);
    Some(Node::Element(clone))
}

fn extract_after(element: &mut Element, path: &[usize], offset: usize) -> Vec<Node> {
    match path.split_first() {
        None => drain_children(element, offset, usize::MAX),
        Some((&index, deeper)) => {
            let mut out: Vec<Node> = partial_after(element, index, deeper, offset)
                .into_iter()
                .collect();
            out.extend(drain_children(element, index + 1, usize::MAX));
            out
        }
    }
}

fn extract_before(element: &mut Element, path: &[usize], offset: usize) -> Vec<Node> {
    match path.split_first() {
        None => drain_children(element, 0, offset),
        Some((&index, deeper)) => {
            let mut out = drain_children(element, 0, index);
            out.extend(partial_before(element, 0, deeper, offset));
            out
        }
    }
}
