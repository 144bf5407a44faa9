//! LocalStorage persistence for the field layout
//!
//! One fixed key in `window.localStorage` holds the JSON array of field
//! records, ids included. No versioning or migration scheme.

use fields_core::{FieldDef, FieldPersistence};
use web_sys::Storage;

/// The key the layout persists under.
pub const STORAGE_KEY: &str = "pdf-fields-app_fields";

/// Browser backend for the core persistence interface. A missing window or
/// storage area is tolerated: loads start empty and saves are dropped.
pub struct LocalStoragePersistence {
    storage: Option<Storage>,
}

impl LocalStoragePersistence {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(
                &"localStorage unavailable; field layout will not persist".into(),
            );
        }
        Self { storage }
    }
}

impl Default for LocalStoragePersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldPersistence for LocalStoragePersistence {
    fn load(&self) -> Vec<FieldDef> {
        let json = match &self.storage {
            Some(storage) => match storage.get_item(STORAGE_KEY) {
                Ok(Some(json)) => json,
                _ => return Vec::new(),
            },
            None => return Vec::new(),
        };

        match serde_json::from_str(&json) {
            Ok(fields) => fields,
            Err(e) => {
                // A layout that no longer parses is discarded, not surfaced.
                web_sys::console::warn_1(
                    &format!("discarding persisted field layout: {}", e).into(),
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, fields: &[FieldDef]) {
        let storage = match &self.storage {
            Some(storage) => storage,
            None => return,
        };

        match serde_json::to_string(fields) {
            Ok(json) => {
                if storage.set_item(STORAGE_KEY, &json).is_err() {
                    web_sys::console::warn_1(&"failed to persist field layout".into());
                } else {
                    web_sys::console::log_1(&format!("saved {} fields", fields.len()).into());
                }
            }
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("failed to serialize field layout: {}", e).into(),
                );
            }
        }
    }
}
