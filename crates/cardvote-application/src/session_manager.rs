use std::sync::Arc;

use cardvote_core::error::Result;
use cardvote_core::session::SessionState;
use cardvote_core::user::{AuthBackend, AuthOutcome, User};
use cardvote_infrastructure::MockSessionStore;
use tokio::sync::watch;

const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";

/// Owns the authentication session.
///
/// `SessionManager` is responsible for:
/// - Restoring the persisted `{user, token}` pair on startup
/// - Running login and registration against an [`AuthBackend`]
/// - Persisting and clearing the session keys (it is their only writer)
/// - Publishing every session change to subscribers
pub struct SessionManager {
    /// Backend answering login/register requests
    backend: Arc<dyn AuthBackend>,
    /// Persistent store holding the session keys
    store: MockSessionStore,
    /// Current session, observable through [`SessionManager::subscribe`]
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Creates a manager and rehydrates the persisted session.
    ///
    /// A half-present pair (user without token or the other way round) is
    /// treated as logged out and both keys are cleared.
    pub fn new(backend: Arc<dyn AuthBackend>, store: MockSessionStore) -> Self {
        let restored = Self::restore(&store);
        let (state, _) = watch::channel(restored);
        Self {
            backend,
            store,
            state,
        }
    }

    fn restore(store: &MockSessionStore) -> SessionState {
        match (store.session_user(), store.token()) {
            (Some(user), Some(token)) => {
                tracing::info!("Restored session for {}", user.email);
                SessionState::authenticated(user, token)
            }
            (None, None) => SessionState::anonymous(),
            _ => {
                tracing::warn!("Discarding incomplete persisted session");
                if let Err(e) = store.clear_session() {
                    tracing::warn!("Failed to clear incomplete session: {}", e);
                }
                SessionState::anonymous()
            }
        }
    }

    /// Registers a new account and logs it in on success.
    ///
    /// Never fails: backend faults become `success: false` outcomes carrying
    /// the server's message or a fallback text.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> AuthOutcome {
        let result = self.backend.register(email, name, password).await;
        self.settle(result, REGISTRATION_FAILED)
    }

    /// Logs in with email and password. Never fails, see [`Self::register`].
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let result = self.backend.login(email, password).await;
        self.settle(result, LOGIN_FAILED)
    }

    fn settle(&self, result: Result<AuthOutcome>, fallback: &str) -> AuthOutcome {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("{}: {}", fallback, e);
                return AuthOutcome::failure(e.server_message().unwrap_or_else(|| fallback.to_string()));
            }
        };

        if !outcome.success {
            tracing::debug!("{}: {}", fallback, outcome.message);
            return outcome;
        }

        let (Some(user), Some(token)) = (outcome.user.clone(), outcome.token.clone()) else {
            tracing::error!("{}: backend reported success without user and token", fallback);
            return AuthOutcome::failure(fallback);
        };

        if let Err(e) = self.store.save_session(&user, &token) {
            tracing::warn!("Session for {} is not persisted: {}", user.email, e);
        }
        tracing::info!("Signed in as {}", user.email);
        self.state.send_replace(SessionState::authenticated(user, token));
        outcome
    }

    /// Clears the session. Calling it while logged out changes nothing.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear_session() {
            tracing::warn!("Failed to clear persisted session: {}", e);
        }
        let previous = self.state.send_replace(SessionState::anonymous());
        if let Some(user) = previous.current_user() {
            tracing::info!("Signed out {}", user.email);
        }
    }

    /// Snapshot of the current session.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receiver that observes every login, registration and logout.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}
