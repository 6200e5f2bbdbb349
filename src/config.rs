//! Store connection settings.

use crate::room::RoomId;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Connection settings for the replicated store.
///
/// Credentials are deployment configuration: a database endpoint, an
/// optional static auth token, and an optional public base URL used to
/// build share links for the second player.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Realtime database endpoint, e.g. `https://demo.firebaseio.com`.
    database_url: String,

    /// Auth token appended to every store request.
    #[serde(default)]
    auth_token: Option<String>,

    /// Public base URL for share links.
    #[serde(default)]
    public_url: Option<String>,
}

impl SyncConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(database_url: String) -> Self {
        Self {
            database_url,
            auth_token: None,
            public_url: None,
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(database_url = %config.database_url, "config loaded");
        Ok(config)
    }

    /// Reads configuration from `TICTAC_DATABASE_URL`,
    /// `TICTAC_AUTH_TOKEN`, and `TICTAC_PUBLIC_URL`.
    #[instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("TICTAC_DATABASE_URL").map_err(|_| {
            ConfigError::new("TICTAC_DATABASE_URL environment variable not set")
        })?;

        Ok(Self {
            database_url,
            auth_token: std::env::var("TICTAC_AUTH_TOKEN").ok(),
            public_url: std::env::var("TICTAC_PUBLIC_URL").ok(),
        })
    }

    /// Share link for a room, when a public base URL is configured.
    pub fn share_url(&self, room: &RoomId) -> Option<String> {
        self.public_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), room))
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = \"https://demo.firebaseio.com\"").unwrap();
        writeln!(file, "public_url = \"https://play.example.com/\"").unwrap();

        let config = SyncConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database_url(), "https://demo.firebaseio.com");
        assert!(config.auth_token().is_none());

        let room = RoomId::parse("k3x9p2").unwrap();
        assert_eq!(
            config.share_url(&room).as_deref(),
            Some("https://play.example.com/k3x9p2")
        );
    }

    #[test]
    fn rejects_missing_endpoint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "auth_token = \"secret\"").unwrap();
        assert!(SyncConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn share_link_needs_a_public_base() {
        let config = SyncConfig::new("https://demo.firebaseio.com".to_string());
        assert!(config.share_url(&RoomId::generate()).is_none());
    }
}
