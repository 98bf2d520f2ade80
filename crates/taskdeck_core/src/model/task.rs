//! Task record and the draft/patch input types.
//!
//! # Responsibility
//! - Define the canonical task shape shared by the store and every view.
//! - Validate create/update input before it reaches persistence.
//! - Pin field names to the persisted snapshot's camelCase wire form.
//!
//! # Invariants
//! - `title` and `description` are non-empty on every accepted write.
//! - `created_at <= updated_at`; `updated_at` moves strictly forward on
//!   each applied mutation.
//!
//! # See also
//! - `store::task_store` for id assignment and snapshot writes.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stable task identifier.
///
/// Assigned once at creation from the epoch-millisecond clock (bumped past
/// the newest existing id on collision) and never reused.
pub type TaskId = u64;

/// Lifecycle state of a task.
///
/// Serialized under the variant names themselves (`"NotStarted"` etc.),
/// which are the snapshot wire tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created but not picked up yet. The default for new tasks.
    #[default]
    NotStarted,
    /// Actively being worked on.
    InProgress,
    /// Finished.
    Done,
}

/// One task as stored in the snapshot and held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable id used for detail routes and lookups.
    pub id: TaskId,
    /// Short summary line. Never empty.
    pub title: String,
    /// Free-form body text. Absent in a snapshot deserializes as `""`.
    #[serde(default)]
    pub description: String,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Set once at creation; immutable afterwards.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every applied mutation, including no-op patches.
    pub updated_at: DateTime<Utc>,
    /// Optional deadline. Omitted from the snapshot when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Materializes an accepted draft at `now` under a caller-assigned id.
    ///
    /// # Contract
    /// - The caller has already validated `draft` and guaranteed that `id`
    ///   is unique within the collection.
    /// - `created_at` and `updated_at` both start at `now`.
    pub fn from_draft(id: TaskId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            created_at: now,
            updated_at: now,
            due_date: draft.due_date,
        }
    }

    /// Merges `patch` into the task and refreshes `updated_at`.
    ///
    /// # Contract
    /// - The caller has already validated `patch`.
    /// - Fields absent from the patch keep their stored values.
    /// - `updated_at` ends strictly greater than its previous value even
    ///   when `now` has not advanced past it (mutation bursts inside one
    ///   clock tick).
    pub fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.updated_at = advance_past(self.updated_at, now);
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Required; rejected when empty or whitespace-only.
    pub title: String,
    /// Required; rejected when empty or whitespace-only.
    pub description: String,
    /// Initial state; defaults to [`TaskStatus::NotStarted`].
    pub status: TaskStatus,
    /// Optional deadline.
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Builds a draft with the default status and no due date.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Checks the required-field rules.
    ///
    /// # Errors
    /// [`TaskValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        check_title(&self.title)?;
        check_description(&self.description)?;
        Ok(())
    }
}

/// Partial update applied to an existing task.
///
/// `None` fields are left unchanged. The nested option on `due_date`
/// distinguishes "leave as is" (`None`) from "clear the deadline"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Returns whether no field is set.
    ///
    /// An empty patch is still a legal update; it only refreshes
    /// `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }

    /// Checks the required-field rules for the fields present in the patch.
    ///
    /// # Errors
    /// [`TaskValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(description) = &self.description {
            check_description(description)?;
        }
        Ok(())
    }
}

/// Rejected create/update input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `title` was empty or whitespace-only.
    EmptyTitle,
    /// `description` was empty or whitespace-only.
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyDescription => write!(f, "task description must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

fn check_title(value: &str) -> Result<(), TaskValidationError> {
    if value.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

fn check_description(value: &str) -> Result<(), TaskValidationError> {
    if value.trim().is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    Ok(())
}

/// Next `updated_at` value: `now`, or one tick past `prev` when the clock
/// has not moved.
fn advance_past(prev: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > prev {
        now
    } else {
        prev + Duration::microseconds(1)
    }
}
