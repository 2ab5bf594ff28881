//! Path management for CardVote files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cardvote/
//! ├── config.toml     # Client configuration
//! └── store.json      # Session store (users, session, reactions)
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for cardvote_core::CardVoteError {
    fn from(err: PathError) -> Self {
        cardvote_core::CardVoteError::config(err.to_string())
    }
}

const APP_DIR: &str = "cardvote";

pub struct CardVotePaths;

impl CardVotePaths {
    /// Returns the CardVote configuration directory (e.g. `~/.config/cardvote/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default path of the session store.
    pub fn store_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("store.json"))
    }
}
