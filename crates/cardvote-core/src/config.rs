//! Client configuration model.
//!
//! Every field carries a default so that a missing or partial `config.toml`
//! still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CardVoteError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Where login/register requests are answered.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Mock backend over the local session store.
    #[default]
    Local,
    /// `/api/v1/auth/*` endpoints of the collaborating backend.
    Remote,
}

/// What to do with a fetch result whose request has been superseded.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaleResultPolicy {
    /// Drop results from superseded requests.
    #[default]
    Discard,
    /// Apply every result in arrival order.
    Apply,
}

/// Whether a vote may be submitted while another one is in flight.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlappingVotePolicy {
    #[default]
    Allow,
    Reject,
}

/// Tunables for the review session controller.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ReviewSettings {
    /// Watchdog bound for a single item fetch.
    pub item_timeout_secs: u64,
    /// Delay between a successful vote and the next item fetch.
    pub advance_delay_ms: u64,
    /// Maximum number of action history entries kept.
    pub history_capacity: usize,
    pub stale_results: StaleResultPolicy,
    pub overlapping_votes: OverlappingVotePolicy,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            item_timeout_secs: 15,
            advance_delay_ms: 300,
            history_capacity: 5,
            stale_results: StaleResultPolicy::default(),
            overlapping_votes: OverlappingVotePolicy::default(),
        }
    }
}

impl ReviewSettings {
    /// Rejects settings that would disable the watchdog or the history.
    pub fn validate(&self) -> Result<()> {
        if self.item_timeout_secs == 0 {
            return Err(CardVoteError::config("review.item_timeout_secs must be at least 1"));
        }
        if self.history_capacity == 0 {
            return Err(CardVoteError::config("review.history_capacity must be at least 1"));
        }
        Ok(())
    }

    pub fn item_timeout(&self) -> Duration {
        Duration::from_secs(self.item_timeout_secs)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the collaborating backend, without a trailing slash.
    pub api_base_url: String,
    pub auth_mode: AuthMode,
    /// Location of the session store file. `None` selects the platform default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
    /// Simulated round trip of the local auth backend.
    pub auth_latency_ms: u64,
    /// Upper bound for any single backend request.
    pub request_timeout_secs: u64,
    pub review: ReviewSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_mode: AuthMode::default(),
            store_path: None,
            auth_latency_ms: 500,
            request_timeout_secs: 30,
            review: ReviewSettings::default(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(CardVoteError::config("request_timeout_secs must be at least 1"));
        }
        self.review.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }
}
