//! Q-table persistence through a key-value store.

use tracing::{debug, warn};

use crate::{Result, ports::KeyValueStore, q_learning::QTable};

/// Serialize `table` to JSON text and store it under `key`.
pub fn save_table<S>(store: &S, key: &str, table: &QTable) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(table)?;
    store.set(key, &text)?;
    debug!(key, states = table.state_count(), "saved q-table");
    Ok(())
}

/// Load the table stored under `key`.
///
/// Returns `None` when the key is absent, and also when the store cannot be
/// read or the text does not parse; those failures are logged and dropped.
pub fn load_table<S>(store: &S, key: &str) -> Option<QTable>
where
    S: KeyValueStore + ?Sized,
{
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!(key, "no stored q-table");
            return None;
        }
        Err(error) => {
            warn!(key, %error, "failed to read stored q-table");
            return None;
        }
    };

    match serde_json::from_str::<QTable>(&text) {
        Ok(table) => {
            debug!(key, states = table.state_count(), "loaded q-table");
            Some(table)
        }
        Err(error) => {
            warn!(key, %error, "stored q-table is not valid JSON");
            None
        }
    }
}
