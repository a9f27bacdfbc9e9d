//! Ports (trait boundaries) for external dependencies.
//!
//! The host environment owns the storage media the learner persists into.
//! These traits are owned by the domain and implemented by adapters in the
//! infrastructure layer.

pub mod repository;
pub mod store;

pub use repository::SnapshotRepository;
pub use store::KeyValueStore;
