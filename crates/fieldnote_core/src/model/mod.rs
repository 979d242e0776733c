//! Notebook domain model.
//!
//! # Responsibility
//! - Define the persisted entry record and the in-memory notebook state.
//!
//! # Invariants
//! - Entry identity is positional; there is no stable id.
//! - A non-empty notebook always has an in-range cursor.

pub mod entry;
pub mod notebook;
