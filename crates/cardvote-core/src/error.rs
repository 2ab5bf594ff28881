//! Error types for the CardVote client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire CardVote client.
///
/// Only faults travel through this type. Expected business failures
/// (duplicate registration, bad credentials, rejected votes) are reported as
/// structured outcomes instead, see [`crate::user::AuthOutcome`] and
/// [`crate::content::VoteOutcome`].
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CardVoteError {
    /// The request never produced a response (connection refused, DNS, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CardVoteError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an Http error from a status code and the response body
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the HTTP status code, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body, when the backend sent one.
    pub fn server_message(&self) -> Option<String> {
        let Self::Http { body, .. } = self else {
            return None;
        };
        let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// Human readable message suitable for a notification: the server's
    /// message when present, otherwise the display form.
    pub fn user_message(&self) -> String {
        self.server_message().unwrap_or_else(|| self.to_string())
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CardVoteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CardVoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CardVoteError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CardVoteError>`.
pub type Result<T> = std::result::Result<T, CardVoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = CardVoteError::http(409, r#"{"message":"Vote rejected"}"#);
        assert_eq!(err.user_message(), "Vote rejected");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = CardVoteError::http(500, "<html>boom</html>");
        assert_eq!(err.user_message(), "HTTP 500: <html>boom</html>");

        let err = CardVoteError::transport("connection refused");
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "Transport error: connection refused");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CardVoteError = json_err.into();
        assert!(matches!(err, CardVoteError::Serialization { ref format, .. } if format == "JSON"));
    }
}
