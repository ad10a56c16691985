//! User-related API endpoints

use crate::ApiClient;
use crate::error::Result;
use pier_core::domain::user::User;
use pier_core::dto::response::ItemsPayload;
use reqwest::Method;

impl ApiClient {
    // =============================================================================
    // Users
    // =============================================================================

    /// Get the user the access token belongs to
    pub async fn current_user(&self) -> Result<User> {
        let response = self.request(Method::GET, "/api/user").send().await?;

        self.handle_response(response).await
    }

    /// Look up several users at once
    ///
    /// Sends one `uid` query parameter per id, in the given order.
    pub async fn list_users(&self, user_ids: &[&str]) -> Result<ItemsPayload<User>> {
        let query: Vec<(&str, &str)> = user_ids.iter().map(|id| ("uid", *id)).collect();
        let response = self
            .request(Method::GET, "/api/users")
            .query(&query)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
