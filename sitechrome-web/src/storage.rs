//! `localStorage`-backed preference store.

use sitechrome_core::{MemoryStore, PreferenceStore};
use web_sys::Storage;

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Preference store for the page.
///
/// Falls back to memory when the browser blocks `localStorage` (private
/// modes, disabled cookies), so preferences still work for the current page.
#[derive(Debug, Clone)]
pub enum WebPreferenceStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl WebPreferenceStore {
    #[must_use]
    pub fn open() -> Self {
        match dom::local_storage() {
            Ok(storage) => Self::Local(storage),
            Err(e) => {
                log::warn!(
                    "localStorage unavailable, preferences will not persist: {}",
                    dom::js_error_message(&e)
                );
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl PreferenceStore for WebPreferenceStore {
    type Error = WebError;

    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(memory) => memory.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        match self {
            Self::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| WebError::Storage(dom::js_error_message(&e))),
            Self::Memory(memory) => {
                let Ok(()) = memory.set(key, value);
                Ok(())
            }
        }
    }
}
