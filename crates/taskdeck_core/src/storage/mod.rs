//! Key-value storage capability.
//!
//! # Responsibility
//! - Define the narrow get/set contract every persisted slot goes through.
//! - Keep backend details (files, in-memory maps) out of store logic.
//!
//! # Invariants
//! - Slot keys are non-empty and never contain path separators.
//! - Reading a never-written slot is `Ok(None)`, not an error.
//!
//! # See also
//! - `store::task_store` and `store::theme_store`, the only writers.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Slot holding the JSON task snapshot.
pub const TASKS_KEY: &str = "tasks";
/// Slot holding the theme wire string.
pub const THEME_KEY: &str = "theme";

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level failure of a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// The key is empty or would escape the backend namespace.
    InvalidKey(String),
    /// Filesystem failure underneath [`FileStorage`].
    Io { path: PathBuf, source: io::Error },
    /// Backend failure with no richer shape (quota, bridge errors).
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::Io { path, source } => {
                write!(f, "storage io failure at `{}`: {source}", path.display())
            }
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidKey(_) | Self::Backend(_) => None,
        }
    }
}

/// Injected persistence capability for named string slots.
///
/// # Contract
/// - `get` returns `Ok(None)` for a slot that was never written.
/// - `set` overwrites the whole slot; there are no partial writes.
/// - Both take `&self`; backends that need state use single-threaded
///   interior mutability.
pub trait KeyValueStorage {
    /// Reads one slot.
    ///
    /// # Errors
    /// [`StorageError`] on invalid keys or backend failure.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites one slot with the full serialized value.
    ///
    /// # Errors
    /// [`StorageError`] on invalid keys or backend failure.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

// Lets one backend instance be shared between the task and theme stores.
impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// Shared key validation for all backends.
fn check_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
