//! Core domain logic for TaskDeck.
//! This crate is the single source of truth for task business invariants.

pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskValidationError};
pub use model::theme::Theme;
pub use query::preview::{describe_preview, DescriptionPreview};
pub use query::state::{QueryState, StatusFilter};
pub use query::stats::TaskStats;
pub use query::text::fold_search_text;
pub use storage::{
    FileStorage, KeyValueStorage, MemoryStorage, StorageError, StorageResult, TASKS_KEY,
    THEME_KEY,
};
pub use store::task_store::{StoreError, StoreResult, TaskStore};
pub use store::theme_store::ThemeStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
