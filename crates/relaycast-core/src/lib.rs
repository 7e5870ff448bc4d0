//! Core domain layer for Relaycast.
//!
//! Contains the conversation domain models (messages, sessions, topics),
//! the abstract seams toward the environment (agent backend, key/value
//! stores, notification channel), and the shared error type. Concrete
//! implementations live in `relaycast-infrastructure`; the orchestration
//! logic lives in `relaycast-application`.

pub mod backend;
pub mod error;
pub mod message;
pub mod notify;
pub mod session;
pub mod store;
pub mod topic;

// Re-export common error type
pub use error::{RelaycastError, Result};
