//! Derived views over the task collection.
//!
//! # Responsibility
//! - Compute presentation-facing projections: the visible subset, status
//!   counts and description previews.
//!
//! # Invariants
//! - Everything here is read-only over `&[Task]`; mutation stays in the
//!   stores.

pub mod preview;
pub mod state;
pub mod stats;
pub mod text;
