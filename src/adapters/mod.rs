//! Storage adapters for the domain ports.
//!
//! Key-value stores carry the bare Q-table ([`InMemoryStore`] for tests,
//! [`FileStore`] for a directory on disk); [`MsgPackRepository`] writes
//! whole-session checkpoints.

pub mod file_store;
pub mod in_memory_store;
pub mod msgpack_repository;

pub use file_store::FileStore;
pub use in_memory_store::InMemoryStore;
pub use msgpack_repository::MsgPackRepository;
