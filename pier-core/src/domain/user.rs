//! User and authentication types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    /// Identity-provider subject
    pub subject: String,
    pub email: String,
    pub contact_email: String,
    pub name: String,
    pub avatar_url: String,
    pub created_at: Option<i64>,
}

/// Tokens issued by a successful sign-in
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    pub user_id: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authentication")
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
