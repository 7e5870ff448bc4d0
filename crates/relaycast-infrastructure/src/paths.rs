//! Unified path management for Relaycast configuration files.
//!
//! All durable Relaycast state lives under the platform config directory.
//! This ensures consistency across Linux, macOS, and Windows.

use std::path::PathBuf;

use relaycast_core::error::{RelaycastError, Result};

/// Unified path management for Relaycast.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/relaycast/         # Config directory (platform-dependent)
/// └── preferences.json         # Durable user preferences
/// ```
pub struct RelaycastPaths;

impl RelaycastPaths {
    /// Returns the Relaycast configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("relaycast"))
            .ok_or_else(|| RelaycastError::internal("Cannot determine config directory"))
    }

    /// Returns the path of the durable preference store file.
    pub fn preferences_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("preferences.json"))
    }
}
