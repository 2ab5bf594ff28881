//! User domain models.

use serde::{Deserialize, Serialize};

/// Identity of an authenticated user. Email is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl User {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    /// Id under which this user's reactions are recorded.
    pub fn id(&self) -> &str {
        &self.email
    }
}

/// Registry entry of the mock backend. The password never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl StoredUser {
    pub fn to_user(&self) -> User {
        User::new(self.email.clone(), self.name.clone())
    }
}

/// Append-only "this user reacted to this item" record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRecord {
    pub user_id: String,
    pub image_id: String,
}
