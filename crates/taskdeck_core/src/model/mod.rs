//! Domain model.
//!
//! # Responsibility
//! - Define the task record, its input types and the theme preference.
//! - Keep wire naming pinned to the persisted snapshot shape.
//!
//! # Invariants
//! - Deletion is permanent; the model carries no tombstone state.

pub mod task;
pub mod theme;
