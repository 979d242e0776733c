//! Notebook use-case services.
//!
//! # Responsibility
//! - Orchestrate notebook state and storage into user-level operations.
//! - Keep hosts decoupled from record formats.

pub mod display;
pub mod entry_store;
pub mod theme;
