//! Infrastructure layer for Relaycast.
//!
//! Concrete implementations of the abstract seams defined in
//! `relaycast-core`: file-backed and in-memory key/value stores, platform
//! path resolution, and a tracing-backed notifier.

pub mod json_file_store;
pub mod memory_store;
pub mod notify;
pub mod paths;

pub use crate::json_file_store::JsonFileStore;
pub use crate::memory_store::MemoryStore;
pub use crate::notify::LogNotifier;
pub use crate::paths::RelaycastPaths;
