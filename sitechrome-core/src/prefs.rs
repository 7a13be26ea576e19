//! Persisted theme preferences.
//!
//! The store only ever sees strings. [`Preferences`] is the one place that
//! turns them into typed values.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::config::StorageKeys;
use crate::theme::BaseTheme;

/// Origin-scoped string key-value storage.
pub trait PreferenceStore {
    type Error: std::error::Error + 'static;

    /// Read a value. Unreadable storage reads as absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// In-memory store, used when the browser refuses persistent storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        store
    }
}

impl PreferenceStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

const FLAG_ON: &str = "1";
const FLAG_OFF: &str = "0";

/// Typed view over the two persisted theme entries.
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: PreferenceStore> Preferences<S> {
    pub const fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Stored base theme; absent or unrecognised values read as the first theme.
    pub fn base_theme(&self) -> BaseTheme {
        self.store
            .get(&self.keys.theme)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_base_theme(&self, theme: BaseTheme) {
        self.write(&self.keys.theme, theme.as_str());
    }

    /// Manual high-contrast flag; only `"1"` counts as enabled.
    pub fn manual_high_contrast(&self) -> bool {
        self.store
            .get(&self.keys.high_contrast)
            .is_some_and(|v| v == FLAG_ON)
    }

    pub fn set_manual_high_contrast(&self, enabled: bool) {
        self.write(
            &self.keys.high_contrast,
            if enabled { FLAG_ON } else { FLAG_OFF },
        );
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            log::warn!("Failed to persist preference {key}={value}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(store: &MemoryStore) -> Preferences<MemoryStore> {
        Preferences::new(store.clone(), StorageKeys::default())
    }

    #[test]
    fn empty_store_reads_defaults() {
        let store = MemoryStore::new();
        let prefs = prefs(&store);
        assert_eq!(prefs.base_theme(), BaseTheme::Indigo);
        assert!(!prefs.manual_high_contrast());
    }

    #[test]
    fn flags_serialize_as_zero_and_one() {
        let store = MemoryStore::new();
        let prefs = prefs(&store);
        prefs.set_manual_high_contrast(true);
        assert_eq!(store.get("highContrast").as_deref(), Some("1"));
        prefs.set_manual_high_contrast(false);
        assert_eq!(store.get("highContrast").as_deref(), Some("0"));
    }

    #[test]
    fn only_literal_one_enables_high_contrast() {
        for raw in ["true", "yes", "", "01"] {
            let store = MemoryStore::with_entries([("highContrast", raw)]);
            assert!(!prefs(&store).manual_high_contrast(), "{raw:?} must read as off");
        }
    }

    #[test]
    fn unknown_theme_reads_as_default() {
        let store = MemoryStore::with_entries([("theme", "sepia")]);
        assert_eq!(prefs(&store).base_theme(), BaseTheme::Indigo);
    }

    #[test]
    fn base_theme_persists_identifier() {
        let store = MemoryStore::new();
        prefs(&store).set_base_theme(BaseTheme::Slate);
        assert_eq!(store.get("theme").as_deref(), Some("slate"));
        assert_eq!(prefs(&store).base_theme(), BaseTheme::Slate);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("quota exceeded")]
    struct QuotaExceeded;

    struct FullStore;

    impl PreferenceStore for FullStore {
        type Error = QuotaExceeded;

        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(QuotaExceeded)
        }
    }

    #[test]
    fn failed_writes_are_swallowed() {
        let prefs = Preferences::new(FullStore, StorageKeys::default());
        prefs.set_base_theme(BaseTheme::Teal);
        prefs.set_manual_high_contrast(true);
        assert_eq!(prefs.base_theme(), BaseTheme::Indigo);
    }
}
