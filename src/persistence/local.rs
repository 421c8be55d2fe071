//! Browser LocalStorage backend

use super::Storage;

/// `window.localStorage`, or nothing if the browser refuses access
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable - progress will not be saved");
        }
        Self { inner }
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.inner else { return };
        if storage.set_item(key, value).is_err() {
            log::warn!("Failed to write {} to LocalStorage", key);
        }
    }
}
