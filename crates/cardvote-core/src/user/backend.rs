//! Authentication backend port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::model::User;
use crate::error::Result;

/// Result of a login or registration attempt.
///
/// Duplicate emails and bad credentials are `success: false` outcomes, not
/// errors. On success both `user` and `token` are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthOutcome {
    pub fn authenticated(message: impl Into<String>, user: User, token: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
            token: None,
        }
    }
}

/// Answers login and registration requests.
///
/// Implementations return `Err` only for faults (unreachable backend,
/// unexpected status); the session manager maps those to failure outcomes.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn register(&self, email: &str, name: &str, password: &str) -> Result<AuthOutcome>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome>;
}
