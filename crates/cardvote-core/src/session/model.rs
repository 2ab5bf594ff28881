//! Session state model.

use serde::Serialize;

use crate::user::User;

/// Authentication state of the client.
///
/// `token` is present iff `current_user` is present; the only constructors
/// are [`SessionState::anonymous`] and [`SessionState::authenticated`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionState {
    current_user: Option<User>,
    token: Option<String>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: impl Into<String>) -> Self {
        Self {
            current_user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_and_token_travel_together() {
        let state = SessionState::anonymous();
        assert!(!state.is_authenticated());
        assert!(state.token().is_none());

        let state = SessionState::authenticated(User::new("a@x.com", "A"), "fake-token-a@x.com");
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some("fake-token-a@x.com"));
        assert_eq!(state.current_user().map(User::id), Some("a@x.com"));
    }
}
