//! Persistence gateway
//!
//! Two independent round trips:
//!
//! - the Q-table alone, as JSON text under one key of a [`KeyValueStore`]
//!   ([`save_table`] / [`load_table`]); a missing or unreadable entry loads
//!   as "no data" rather than an error
//! - a bundled export document with the table, statistics, timestamp and
//!   format version ([`ExportDocument`]); imports also accept a legacy bare
//!   table and report malformed input as [`crate::Error::ImportFailed`]
//!
//! Full-session binary checkpoints ([`SessionSnapshot`]) go through the
//! [`crate::ports::SnapshotRepository`] port.
//!
//! [`KeyValueStore`]: crate::ports::KeyValueStore

pub mod export;
pub mod snapshot;
pub mod table_store;

pub use export::{
    EXPORT_FORMAT_VERSION, ExportDocument, ImportedBrain, export_file_name, import_file,
    parse_import,
};
pub use snapshot::SessionSnapshot;
pub use table_store::{load_table, save_table};
