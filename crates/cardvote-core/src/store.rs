//! Key-value persistence port.

use crate::error::Result;

/// Persisted keys and the JSON shape each one holds.
pub mod keys {
    /// `User` of the active session (no password).
    pub const USER: &str = "user";
    /// Bearer token of the active session.
    pub const TOKEN: &str = "token";
    /// Registry of `StoredUser`.
    pub const USERS: &str = "users";
    /// List of `ReactionRecord` for likes.
    pub const LIKES: &str = "likes";
    /// List of `ReactionRecord` for dislikes.
    pub const DISLIKES: &str = "dislikes";
}

/// Synchronous string-to-string store scoped to the local profile.
///
/// Reads never fail: unavailable or unreadable storage reads as absent.
/// Writes report failures so callers can log them.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
