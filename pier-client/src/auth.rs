//! Authentication endpoints

use crate::ApiClient;
use crate::error::Result;
use pier_core::domain::user::Authentication;
use pier_core::dto::auth::{Credentials, SsoCredentials};
use reqwest::Method;

impl ApiClient {
    // =============================================================================
    // Authentication
    // =============================================================================

    /// Exchange email and password for tokens
    ///
    /// The credentials are validated locally first; an empty email or
    /// password never reaches the API.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Authentication> {
        credentials.validate()?;

        let response = self
            .request(Method::POST, "/api/authenticate")
            .json(credentials)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Exchange an identity-provider ID token for tokens
    pub async fn authenticate_sso(&self, id_token: &str) -> Result<Authentication> {
        let body = SsoCredentials {
            id_token: id_token.to_string(),
        };
        let response = self
            .request(Method::POST, "/api/authenticateSso")
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
