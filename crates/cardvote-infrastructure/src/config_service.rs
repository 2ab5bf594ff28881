//! Configuration loading.
//!
//! Resolution order, later wins: built-in defaults, `config.toml`, the
//! `CARDVOTE_API_URL` environment variable.

use std::path::{Path, PathBuf};

use cardvote_core::config::ClientConfig;
use cardvote_core::error::Result;

use crate::paths::CardVotePaths;

pub const API_URL_ENV: &str = "CARDVOTE_API_URL";

/// Loads [`ClientConfig`] from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform config file (`~/.config/cardvote/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(CardVotePaths::config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration. A missing file yields defaults; a malformed
    /// one, or one with a zero timeout or history capacity, is an error.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            toml::from_str::<ClientConfig>(&content)?
        } else {
            tracing::debug!("No config file at {:?}, using defaults", self.path);
            ClientConfig::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }

        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Resolves where the session store lives for `config`.
    pub fn store_path(config: &ClientConfig) -> Result<PathBuf> {
        match &config.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(CardVotePaths::store_file()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardvote_core::config::AuthMode;
    use cardvote_core::error::CardVoteError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.load().unwrap();
        assert_eq!(config.auth_mode, AuthMode::Local);
        assert_eq!(config.review.history_capacity, 5);
    }

    #[test]
    fn test_loads_file_and_trims_trailing_slash() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"http://127.0.0.1:9000/\"\nauth_mode = \"remote\"\nstore_path = \"/tmp/cards.json\"\n",
        )
        .unwrap();

        let config = ConfigService::with_path(&path).load().unwrap();
        // The env override is only honored when set; keep this test independent of it.
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        }
        assert_eq!(config.auth_mode, AuthMode::Remote);
        assert_eq!(
            ConfigService::store_path(&config).unwrap(),
            PathBuf::from("/tmp/cards.json")
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "auth_mode = [").unwrap();

        assert!(ConfigService::with_path(&path).load().is_err());
    }

    #[test]
    fn test_zero_history_capacity_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[review]\nhistory_capacity = 0\n").unwrap();

        let err = ConfigService::with_path(&path).load().unwrap_err();
        assert!(matches!(err, CardVoteError::Config(_)));
    }

    #[test]
    fn test_zero_item_timeout_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[review]\nitem_timeout_secs = 0\n").unwrap();

        assert!(ConfigService::with_path(&path).load().is_err());
    }
}
