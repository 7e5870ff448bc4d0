//! Provider selection for backend sessions.
//!
//! The backend session itself is an opaque token minted by the agent
//! backend; its record shape lives in [`crate::backend`]. The orchestrator
//! tracks at most one current session id at any instant.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported agent backend providers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderType {
    #[default]
    Anthropic,
    OpenAi,
    Google,
    Ollama,
}
