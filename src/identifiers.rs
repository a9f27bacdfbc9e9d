//! Identifier types for discretized game states.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Key of a discretized observation in the Q-table.
///
/// Produced by the state encoders; two observations whose fields fall into
/// the same buckets always map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Create a new state key.
    ///
    /// # Examples
    ///
    /// ```
    /// use civil_zones_ai::identifiers::StateKey;
    ///
    /// let key = StateKey::new("C|s2|u1|p3");
    /// assert_eq!(key.as_str(), "C|s2|u1|p3");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for StateKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<StateKey> for &str {
    fn eq(&self, other: &StateKey) -> bool {
        *self == other.as_str()
    }
}

impl Borrow<str> for StateKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for StateKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for StateKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
