//! Use-case stores over the storage capability.
//!
//! # Responsibility
//! - Orchestrate model validation, in-memory state and slot writes.
//! - Keep view layers decoupled from storage details.
//!
//! # Invariants
//! - One store instance owns each slot; there is no concurrent writer.

pub mod task_store;
pub mod theme_store;
