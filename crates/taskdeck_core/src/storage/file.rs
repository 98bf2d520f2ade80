//! File-backed storage backend.
//!
//! # Responsibility
//! - Persist each slot as one file, named by its key, under an injected
//!   directory.
//!
//! # Invariants
//! - A slot file is either the previous value or the new one, never a torn
//!   write (temp file + rename).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{check_key, KeyValueStorage, StorageError, StorageResult};

/// One file per slot under `base_dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `base_dir`.
    ///
    /// The directory is created lazily on the first write, so constructing
    /// the storage never touches the filesystem.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory holding the slot files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        check_key(key)?;
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io { path, source: err }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        check_key(key)?;
        fs::create_dir_all(&self.base_dir).map_err(|err| StorageError::Io {
            path: self.base_dir.clone(),
            source: err,
        })?;

        // Atomic-ish write via temp + rename.
        let path = self.slot_path(key);
        let tmp = self.base_dir.join(format!("{key}.tmp"));
        fs::write(&tmp, value).map_err(|err| StorageError::Io {
            path: tmp.clone(),
            source: err,
        })?;
        fs::rename(&tmp, &path).map_err(|err| StorageError::Io { path, source: err })?;
        Ok(())
    }
}
