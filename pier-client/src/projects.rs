//! Project-related API endpoints

use crate::ApiClient;
use crate::error::{ClientError, Result};
use pier_core::domain::project::Project;
use pier_core::dto::response::ItemsPayload;
use reqwest::Method;

impl ApiClient {
    // =============================================================================
    // Projects
    // =============================================================================

    /// List the projects visible to the signed-in user
    pub async fn list_projects(&self) -> Result<ItemsPayload<Project>> {
        let response = self.request(Method::GET, "/api/projects").send().await?;

        self.handle_response(response).await
    }

    /// Get one project by its slug
    ///
    /// The slug becomes one path segment, so characters that would change the
    /// request URL (`/`, `?`, `#`, `%`, whitespace) are rejected.
    ///
    /// # Arguments
    /// * `slug` - Project slug as it appears in the dashboard URL
    pub async fn get_project(&self, slug: &str) -> Result<Project> {
        if !is_valid_slug(slug) {
            return Err(ClientError::InvalidRequest(format!(
                "invalid project slug: {:?}",
                slug
            )));
        }

        let path = format!("/api/project/{}", slug);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
}
