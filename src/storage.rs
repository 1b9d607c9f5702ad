//! Storage Adapter - key/value persistence of JSON-serialized collections.
//!
//! Three keys are used: `grades`, `exams`, `badges`. Values are JSON strings
//! and must round-trip structurally. Storage is never fatal: a missing
//! backend, a write failure, or unreadable stored data all degrade to
//! absence, and the owning collections fall back to empty defaults.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key for the grade collection.
pub const GRADES_KEY: &str = "grades";
/// Storage key for the exam collection.
pub const EXAMS_KEY: &str = "exams";
/// Storage key for badge state.
pub const BADGES_KEY: &str = "badges";

/// Key/value persistence contract.
pub trait Store {
    /// Persist `json` under `key`. Failures are logged and swallowed.
    fn save(&self, key: &str, json: &str);

    /// Load the JSON stored under `key`, or `None` when absent or
    /// unreadable.
    fn load(&self, key: &str) -> Option<String>;
}

/// Browser `localStorage` backend.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    fn warn(message: &str) {
        web_sys::console::warn_1(&message.into());
    }
}

#[cfg(target_arch = "wasm32")]
impl Store for LocalStorage {
    fn save(&self, key: &str, json: &str) {
        match Self::backend() {
            Some(storage) => {
                if storage.set_item(key, json).is_err() {
                    Self::warn(&format!("gradebook-core: failed to persist '{}'", key));
                }
            }
            None => Self::warn("gradebook-core: localStorage unavailable"),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        Self::backend()?.get_item(key).ok().flatten()
    }
}

/// In-memory backend for native builds and tests. Clones share the same
/// underlying map, so a reopened gradebook sees earlier writes.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl Store for MemoryStore {
    fn save(&self, key: &str, json: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), json.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        store.save(GRADES_KEY, "[1,2,3]");
        assert_eq!(store.load(GRADES_KEY), Some("[1,2,3]".to_string()));
    }

    #[test]
    fn test_missing_key_is_absent() {
        let store = MemoryStore::default();
        assert_eq!(store.load(BADGES_KEY), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.save(EXAMS_KEY, "[]");
        assert_eq!(other.load(EXAMS_KEY), Some("[]".to_string()));
    }
}
