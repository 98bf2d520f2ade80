use std::rc::Rc;

use taskdeck_core::{
    KeyValueStorage, MemoryStorage, StorageError, StorageResult, StoreError, Theme, ThemeStore,
    THEME_KEY,
};

#[test]
fn missing_slot_defaults_to_light() {
    let themes = ThemeStore::new(MemoryStorage::new());
    assert_eq!(themes.current(), Theme::Light);
}

#[test]
fn stored_preference_is_loaded() {
    let storage = MemoryStorage::with_slots([(THEME_KEY, "dark")]);
    let themes = ThemeStore::new(storage);
    assert_eq!(themes.current(), Theme::Dark);
}

#[test]
fn unrecognized_slot_contents_default_to_light() {
    let storage = MemoryStorage::with_slots([(THEME_KEY, "hotdog-stand")]);
    let themes = ThemeStore::new(storage);
    assert_eq!(themes.current(), Theme::Light);
}

#[test]
fn toggle_flips_and_persists_the_wire_string() {
    let storage = Rc::new(MemoryStorage::new());
    let mut themes = ThemeStore::new(Rc::clone(&storage));

    assert_eq!(themes.toggle().unwrap(), Theme::Dark);
    assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

    assert_eq!(themes.toggle().unwrap(), Theme::Light);
    assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
}

#[test]
fn failed_write_is_surfaced_but_the_switch_sticks() {
    let mut themes = ThemeStore::new(ReadOnlyStorage);

    let err = themes.set(Theme::Dark).unwrap_err();
    assert!(matches!(err, StoreError::Persist(StorageError::Backend(_))));
    assert_eq!(themes.current(), Theme::Dark);
}

/// Storage double that accepts reads and refuses all writes.
struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Backend("read-only storage".into()))
    }
}
