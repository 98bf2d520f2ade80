//! Task store: single source of truth for the task collection.
//!
//! # Responsibility
//! - Own the in-memory task list and mirror it into the `tasks` slot as one
//!   JSON snapshot after every accepted mutation.
//! - Provide the create/update/complete/delete/list entry points every view
//!   consumes.
//! - Notify subscribers after each mutation attempt.
//!
//! # Invariants
//! - Rejected operations (validation, unknown id) leave both the in-memory
//!   list and the snapshot untouched and notify nobody.
//! - A failed snapshot write keeps the in-memory mutation; memory runs
//!   ahead of the slot until the next successful write.
//! - Task ids stay unique for the lifetime of the collection.
//!
//! # See also
//! - `model::task` for validation and patch semantics.
//! - `storage` for the slot contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskValidationError};
use crate::query::stats::TaskStats;
use crate::storage::{KeyValueStorage, StorageError, TASKS_KEY};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for task operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input failed the required-field rules; nothing changed.
    Validation(TaskValidationError),
    /// No task carries the requested id; nothing changed.
    NotFound(TaskId),
    /// The snapshot write failed; the in-memory mutation is kept.
    Persist(StorageError),
    /// The snapshot could not be encoded; surfaced like a failed write.
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Persist(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "task snapshot encoding failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persist(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Persist(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Change listener invoked with the post-mutation collection.
pub type ChangeListener = Box<dyn Fn(&[Task])>;

/// Single source of truth for the task collection.
///
/// Views never touch the storage capability directly; every read and write
/// of the `tasks` slot flows through this store.
pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    tasks: Vec<Task>,
    listeners: Vec<ChangeListener>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Opens the store over `storage` and loads the persisted snapshot.
    ///
    /// # Contract
    /// - A missing, unreadable or unparsable snapshot degrades to the empty
    ///   collection (logged); opening never fails.
    pub fn new(storage: S) -> Self {
        let tasks = load_snapshot(&storage);
        info!(
            "event=store_open module=store status=ok tasks={}",
            tasks.len()
        );
        Self {
            storage,
            tasks,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener invoked with the new collection after every
    /// mutation attempt.
    ///
    /// # Contract
    /// - Fires after the snapshot write attempt, whether or not the write
    ///   succeeded; the in-memory state it observes is current either way.
    /// - Does not fire for rejected operations.
    pub fn subscribe(&mut self, listener: impl Fn(&[Task]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Current collection in creation order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id (the detail-route read path).
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Status counts over the whole collection.
    pub fn stats(&self) -> TaskStats {
        TaskStats::collect(&self.tasks)
    }

    /// Validates `draft`, assigns a fresh id and appends the new task.
    ///
    /// # Errors
    /// - [`StoreError::Validation`] when a required field is empty.
    /// - [`StoreError::Persist`] / [`StoreError::Json`] when the snapshot
    ///   write fails; the task is still in memory.
    pub fn create(&mut self, draft: TaskDraft) -> StoreResult<&Task> {
        draft.validate()?;

        let now = Utc::now();
        let id = next_task_id(&self.tasks, now);
        self.tasks.push(Task::from_draft(id, draft, now));

        let persisted = self.persist_and_notify();
        log_mutation("task_create", id, &persisted);
        persisted?;
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Merges `patch` onto the task with `id` and refreshes `updated_at`.
    ///
    /// # Contract
    /// - Fields absent from the patch keep their stored values.
    /// - An empty patch is accepted and still refreshes `updated_at`.
    ///
    /// # Errors
    /// - [`StoreError::Validation`] when a patched field is empty.
    /// - [`StoreError::NotFound`] for an unknown id.
    /// - [`StoreError::Persist`] / [`StoreError::Json`] when the snapshot
    ///   write fails; the patch is still applied in memory.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> StoreResult<&Task> {
        patch.validate()?;
        let index = self.index_of(id)?;
        self.tasks[index].apply(patch, Utc::now());

        let persisted = self.persist_and_notify();
        log_mutation("task_update", id, &persisted);
        persisted?;
        Ok(&self.tasks[index])
    }

    /// Marks the task done: `update` with only the status set.
    ///
    /// Idempotent on already-done tasks; `updated_at` is refreshed either
    /// way.
    pub fn complete(&mut self, id: TaskId) -> StoreResult<&Task> {
        self.update(
            id,
            TaskPatch {
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            },
        )
    }

    /// Removes the task permanently.
    ///
    /// Any user-facing confirmation happens in the calling layer; the store
    /// deletes unconditionally.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] for an unknown id.
    /// - [`StoreError::Persist`] / [`StoreError::Json`] when the snapshot
    ///   write fails; the task is still gone from memory.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<()> {
        let index = self.index_of(id)?;
        self.tasks.remove(index);

        let persisted = self.persist_and_notify();
        log_mutation("task_delete", id, &persisted);
        persisted
    }

    fn index_of(&self, id: TaskId) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Writes the full snapshot, then notifies listeners regardless of the
    /// write outcome.
    fn persist_and_notify(&self) -> StoreResult<()> {
        let outcome = self.persist();
        for listener in &self.listeners {
            listener(&self.tasks);
        }
        outcome
    }

    fn persist(&self) -> StoreResult<()> {
        let snapshot = serde_json::to_string(&self.tasks)?;
        self.storage.set(TASKS_KEY, &snapshot)?;
        Ok(())
    }
}

fn log_mutation(event: &str, id: TaskId, outcome: &StoreResult<()>) {
    match outcome {
        Ok(()) => debug!("event={event} module=store status=ok id={id}"),
        Err(err) => error!(
            "event={event} module=store status=error id={id} error_code=snapshot_write_failed error={err}"
        ),
    }
}

/// Reads the persisted snapshot. Every failure shape degrades to the empty
/// collection; corrupt history never blocks startup.
fn load_snapshot<S: KeyValueStorage>(storage: &S) -> Vec<Task> {
    let raw = match storage.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=snapshot_load module=store status=empty reason=missing");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=store status=empty reason=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!(
                "event=snapshot_load module=store status=empty reason=unparsable error={err}"
            );
            Vec::new()
        }
    }
}

/// Assigns the next task id: the creation instant in epoch milliseconds,
/// bumped past the newest existing id when the clock has not advanced
/// between creates.
fn next_task_id(tasks: &[Task], now: DateTime<Utc>) -> TaskId {
    let clock_id = now.timestamp_millis().max(0) as TaskId;
    match tasks.iter().map(|task| task.id).max() {
        Some(max_id) if clock_id <= max_id => max_id + 1,
        _ => clock_id,
    }
}
