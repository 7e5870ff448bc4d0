//! Application layer for Relaycast.
//!
//! Hosts the session orchestrator: the state machine that reconciles the
//! durable preference store, the transient UI-lifetime store, and the
//! backend-held session records behind a race-free mutation surface.

pub mod orchestrator;
pub mod preferences;
pub mod topic_registry;

pub use crate::orchestrator::ChatOrchestrator;
pub use crate::preferences::Preferences;
pub use crate::topic_registry::TopicRegistry;
