//! Agent backend interface.
//!
//! Defines the abstract contract toward the remote agent backend. The
//! orchestrator only sees this opaque request/response surface; transport,
//! process supervision, and authentication are the implementation's
//! concern and out of scope here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::ImageAttachment;
use crate::session::ProviderType;

/// Lifecycle status of the backend agent process.
///
/// Mutated only by explicit start/stop operations, never polled
/// continuously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStatus {
    pub running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Parameters for creating a backend session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub provider_type: ProviderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

/// A freshly created backend session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub session_id: String,
    pub credential_name: String,
    pub credential_uuid: String,
    pub provider_type: ProviderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Parameters for sending a message into a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Session to append to; `None` sends a one-shot message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageAttachment>>,
    /// Model override for this send
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Request web-search augmentation
    #[serde(default)]
    pub web_search: bool,
    /// Request extended thinking
    #[serde(default)]
    pub thinking: bool,
}

/// A backend-held session record, as returned by list/get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: String,
    pub provider_type: ProviderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub message_count: u64,
}

/// An abstract agent backend reachable through request/response calls.
///
/// This trait decouples the orchestrator from the concrete transport
/// (local process, HTTP sidecar, IPC bridge). Every operation is a single
/// round trip; no streaming is modeled at this seam.
///
/// # Implementation Notes
///
/// Implementations should surface failures as [`RelaycastError`] values
/// rather than panicking; the orchestrator catches them at its boundary
/// and never retries automatically.
///
/// [`RelaycastError`]: crate::error::RelaycastError
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Starts the backend agent process.
    async fn start_process(&self) -> Result<ProcessStatus>;

    /// Stops the backend agent process.
    async fn stop_process(&self) -> Result<()>;

    /// Queries the backend process lifecycle status.
    async fn process_status(&self) -> Result<ProcessStatus>;

    /// Creates a new backend session.
    async fn create_session(&self, request: CreateSessionRequest) -> Result<CreatedSession>;

    /// Sends a message and returns the final response text.
    async fn send_message(&self, request: SendMessageRequest) -> Result<String>;

    /// Lists all backend-held sessions, in backend order.
    async fn list_sessions(&self) -> Result<Vec<SessionRecord>>;

    /// Fetches a single session record.
    async fn get_session(&self, session_id: &str) -> Result<SessionRecord>;

    /// Deletes a backend session.
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}
