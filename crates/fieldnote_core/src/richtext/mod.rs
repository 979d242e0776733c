//! Rich-text editing core.
//!
//! # Responsibility
//! - Model surface content as a node tree with markup round-tripping.
//! - Apply selection-scoped edits through the `EditingSurface` contract.
//!
//! # Invariants
//! - Persisted notes are serialized markup; the tree exists only while
//!   editing.

pub(crate) mod command;
pub mod image;
pub mod markup;
pub mod mutator;
pub mod node;
pub mod range;
pub mod surface;
