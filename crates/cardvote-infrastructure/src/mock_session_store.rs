//! Typed view over the persisted session store.
//!
//! Stands in for a backend's user table and reaction logs. Every collection is
//! stored as JSON under one of the keys in [`cardvote_core::store::keys`].

use std::collections::HashSet;
use std::sync::Arc;

use cardvote_core::content::VoteDirection;
use cardvote_core::error::Result;
use cardvote_core::store::{KeyValueStore, keys};
use cardvote_core::user::{ReactionRecord, StoredUser, User};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct MockSessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl MockSessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring malformed '{}' entry: {}", key, e);
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_string(value)?)
    }

    // ============================================================================
    // User registry
    // ============================================================================

    pub fn users(&self) -> Vec<StoredUser> {
        self.read(keys::USERS).unwrap_or_default()
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.users().iter().any(|u| u.email == email)
    }

    /// Finds the registry entry matching both email and password.
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<StoredUser> {
        self.users()
            .into_iter()
            .find(|u| u.email == email && u.password == password)
    }

    /// Appends a user. Uniqueness is checked by the caller.
    pub fn append_user(&self, user: StoredUser) -> Result<()> {
        let mut users = self.users();
        users.push(user);
        self.write(keys::USERS, &users)
    }

    // ============================================================================
    // Active session
    // ============================================================================

    pub fn session_user(&self) -> Option<User> {
        self.read(keys::USER)
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(keys::TOKEN).filter(|t| !t.is_empty())
    }

    pub fn save_session(&self, user: &User, token: &str) -> Result<()> {
        self.write(keys::USER, user)?;
        self.store.set(keys::TOKEN, token.to_string())
    }

    /// Removes both session keys. Safe to call when nothing is stored.
    pub fn clear_session(&self) -> Result<()> {
        let user_result = self.store.remove(keys::USER);
        let token_result = self.store.remove(keys::TOKEN);
        user_result.and(token_result)
    }

    // ============================================================================
    // Reaction records
    // ============================================================================

    fn reaction_key(direction: VoteDirection) -> &'static str {
        match direction {
            VoteDirection::Like => keys::LIKES,
            VoteDirection::Dislike => keys::DISLIKES,
        }
    }

    pub fn reactions(&self, direction: VoteDirection) -> Vec<ReactionRecord> {
        self.read(Self::reaction_key(direction)).unwrap_or_default()
    }

    /// Image ids the user has reacted to in `direction`.
    pub fn user_reactions(&self, direction: VoteDirection, user_id: &str) -> HashSet<String> {
        self.reactions(direction)
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.image_id)
            .collect()
    }

    pub fn append_reaction(&self, direction: VoteDirection, record: ReactionRecord) -> Result<()> {
        let mut records = self.reactions(direction);
        records.push(record);
        self.write(Self::reaction_key(direction), &records)
    }
}
