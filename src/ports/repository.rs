//! Repository port for full training-session checkpoints.

use std::path::Path;

use crate::{Result, persistence::SessionSnapshot};

/// Port for persisting and loading session snapshots.
///
/// Unlike the key-value path, which only carries the Q-table, a snapshot
/// holds the table, statistics and death log together.
pub trait SnapshotRepository {
    /// Save a snapshot to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<()>;

    /// Load a snapshot from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or corrupted.
    fn load(&self, path: &Path) -> Result<SessionSnapshot>;
}
