//! Sign-in request bodies

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Email/password sign-in body for `POST /api/authenticate`
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-empty before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(CoreError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(CoreError::MissingField("password"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Single sign-on body for `POST /api/authenticateSso`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoCredentials {
    pub id_token: String,
}
