//! Theme preference store.
//!
//! # Responsibility
//! - Own the `theme` slot and the in-memory current value.
//!
//! # Invariants
//! - Missing or unrecognized slot contents degrade to [`Theme::Light`].
//! - The slot holds the bare wire string, not a JSON document.

use log::{debug, error, warn};

use crate::model::theme::Theme;
use crate::storage::{KeyValueStorage, THEME_KEY};
use crate::store::task_store::{StoreError, StoreResult};

/// Store for the persisted display theme.
pub struct ThemeStore<S: KeyValueStorage> {
    storage: S,
    current: Theme,
}

impl<S: KeyValueStorage> ThemeStore<S> {
    /// Opens the store and reads the persisted preference.
    ///
    /// Like the task store, opening never fails; unreadable state falls
    /// back to the default theme.
    pub fn new(storage: S) -> Self {
        let current = load_theme(&storage);
        Self { storage, current }
    }

    /// Current preference.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Makes `theme` current and persists it.
    ///
    /// # Errors
    /// [`StoreError::Persist`] when the slot write fails; the in-memory
    /// value stays switched, matching the task store's failure handling.
    pub fn set(&mut self, theme: Theme) -> StoreResult<()> {
        self.current = theme;
        match self.storage.set(THEME_KEY, theme.as_str()) {
            Ok(()) => {
                debug!(
                    "event=theme_set module=store status=ok theme={}",
                    theme.as_str()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=theme_set module=store status=error theme={} error_code=slot_write_failed error={err}",
                    theme.as_str()
                );
                Err(StoreError::Persist(err))
            }
        }
    }

    /// Flips between light and dark and persists the result.
    pub fn toggle(&mut self) -> StoreResult<Theme> {
        self.set(self.current.toggled())?;
        Ok(self.current)
    }
}

fn load_theme<S: KeyValueStorage>(storage: &S) -> Theme {
    match storage.get(THEME_KEY) {
        Ok(Some(raw)) => match Theme::parse(&raw) {
            Some(theme) => theme,
            None => {
                warn!(
                    "event=theme_load module=store status=default reason=unparsable value={raw}"
                );
                Theme::default()
            }
        },
        Ok(None) => Theme::default(),
        Err(err) => {
            warn!("event=theme_load module=store status=default reason=read_failed error={err}");
            Theme::default()
        }
    }
}
