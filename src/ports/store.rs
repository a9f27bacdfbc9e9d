//! Key-value store port for Q-table persistence.

use crate::Result;

/// Text key-value medium, such as browser-style local storage or a
/// directory of files.
///
/// # Examples
///
/// ```
/// use civil_zones_ai::adapters::InMemoryStore;
/// use civil_zones_ai::ports::KeyValueStore;
///
/// let store = InMemoryStore::new();
/// store.set("civil_zones_qtable", "{}")?;
/// assert_eq!(store.get("civil_zones_qtable")?.as_deref(), Some("{}"));
/// # Ok::<(), civil_zones_ai::Error>(())
/// ```
pub trait KeyValueStore {
    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
