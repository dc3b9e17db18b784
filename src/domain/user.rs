use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, NamedEntity};

/// A registered user able to hold a session token.
///
/// Passwords are stored as SHA-256 hex digests; the plain text never
/// touches the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            token: None,
            created_at: Utc::now(),
        }
    }
}

impl NamedEntity for User {
    fn name(&self) -> &str {
        &self.username
    }
}

impl Displayable for User {
    fn display_label(&self) -> String {
        let state = if self.token.is_some() {
            "active session"
        } else {
            "no session"
        };
        format!("{} ({})", self.username, state)
    }
}
