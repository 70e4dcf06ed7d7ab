//! Browser local storage as a [`PreferenceStore`].

use web_sys::{Storage, Window};

use crate::prefs::{MemoryStore, PreferenceStore};

pub struct LocalStorage {
    storage: Storage,
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(err) = self.storage.set_item(key, value) {
            log::debug!("storage write {key} failed: {err:?}");
        }
    }
}

/// Local storage when the browser allows it, otherwise a session-only map.
pub fn open(window: &Window) -> Box<dyn PreferenceStore> {
    match window.local_storage() {
        Ok(Some(storage)) => Box::new(LocalStorage { storage }),
        Ok(None) => {
            log::warn!("localStorage unavailable; preferences last for this page only");
            Box::new(MemoryStore::new())
        }
        Err(err) => {
            log::warn!("localStorage blocked ({err:?}); preferences last for this page only");
            Box::new(MemoryStore::new())
        }
    }
}
