//! Browser LocalStorage store (wasm32)
//!
//! Values are stored as decimal strings, matching what other pages on the
//! same origin write.

use super::{ScoreStore, StoreError, parse_score};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage on this window".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        raw.map(|raw| parse_score(key, &raw)).transpose()
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
