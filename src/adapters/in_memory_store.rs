//! In-memory key-value store.
//!
//! Stands in for the host's storage medium in tests and headless runs.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, ports::KeyValueStore};

/// In-memory key-value store.
///
/// All clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of keys currently stored.
    pub fn count(&self) -> usize {
        self.entries().len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    /// Clear all stored values.
    pub fn clear(&self) {
        self.entries().clear();
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.count(), 1);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(!store.contains("k"));
    }

    #[test]
    fn test_clone_shares_storage() {
        let first = InMemoryStore::new();
        let second = first.clone();
        first.set("shared", "yes").unwrap();
        assert_eq!(second.get("shared").unwrap().as_deref(), Some("yes"));

        second.clear();
        assert_eq!(first.count(), 0);
    }
}
