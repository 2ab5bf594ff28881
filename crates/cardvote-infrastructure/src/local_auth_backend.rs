//! Mock auth backend over the local session store.
//!
//! Emulates a server round trip with a fixed delay and enforces the invariants
//! a real backend would: unique emails on registration, matching email and
//! password on login.

use std::time::Duration;

use async_trait::async_trait;
use cardvote_core::error::Result;
use cardvote_core::user::{AuthBackend, AuthOutcome, StoredUser, User};

use crate::mock_session_store::MockSessionStore;

pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Derives the mock bearer token for `email`.
pub fn derive_token(email: &str) -> String {
    format!("fake-token-{email}")
}

pub struct LocalAuthBackend {
    store: MockSessionStore,
    latency: Duration,
}

impl LocalAuthBackend {
    pub fn new(store: MockSessionStore, latency: Duration) -> Self {
        Self { store, latency }
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthBackend for LocalAuthBackend {
    async fn register(&self, email: &str, name: &str, password: &str) -> Result<AuthOutcome> {
        self.round_trip().await;

        if self.store.contains_email(email) {
            tracing::debug!("Registration rejected, {} already registered", email);
            return Ok(AuthOutcome::failure(USER_EXISTS_MESSAGE));
        }

        self.store.append_user(StoredUser {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        })?;

        Ok(AuthOutcome::authenticated(
            "User registered successfully",
            User::new(email, name),
            derive_token(email),
        ))
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        self.round_trip().await;

        match self.store.find_by_credentials(email, password) {
            Some(user) => Ok(AuthOutcome::authenticated(
                "Login successful",
                user.to_user(),
                derive_token(email),
            )),
            None => Ok(AuthOutcome::failure(INVALID_CREDENTIALS_MESSAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn backend(latency: Duration) -> (MockSessionStore, LocalAuthBackend) {
        let store = MockSessionStore::new(Arc::new(MemoryStore::new()));
        (store.clone(), LocalAuthBackend::new(store, latency))
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let (store, backend) = backend(Duration::ZERO);

        let first = backend.register("a@x.com", "A", "pw1").await.unwrap();
        assert!(first.success);
        assert_eq!(first.token.as_deref(), Some("fake-token-a@x.com"));
        assert_eq!(first.user, Some(User::new("a@x.com", "A")));

        let second = backend.register("a@x.com", "Other", "pw2").await.unwrap();
        assert!(!second.success);
        assert_eq!(second.message, USER_EXISTS_MESSAGE);
        assert!(second.token.is_none());
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.users()[0].name, "A");
    }

    #[tokio::test]
    async fn test_login_requires_matching_password() {
        let (_, backend) = backend(Duration::ZERO);
        backend.register("a@x.com", "A", "pw1").await.unwrap();

        let bad = backend.login("a@x.com", "wrong").await.unwrap();
        assert!(!bad.success);
        assert_eq!(bad.message, INVALID_CREDENTIALS_MESSAGE);

        let good = backend.login("a@x.com", "pw1").await.unwrap();
        assert!(good.success);
        assert_eq!(good.user.unwrap().display_name, "A");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let (_, backend) = backend(Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        backend.login("nobody@x.com", "pw").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
