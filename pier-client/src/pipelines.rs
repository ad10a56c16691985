//! Pipeline-related API endpoints

use crate::ApiClient;
use crate::error::Result;
use pier_core::domain::pipeline::Pipeline;
use pier_core::dto::response::ItemsPayload;
use reqwest::Method;

impl ApiClient {
    // =============================================================================
    // Pipelines
    // =============================================================================

    /// List the pipelines of a project
    ///
    /// # Arguments
    /// * `project_id` - Project the pipelines belong to (the `pid` query parameter)
    ///
    /// # Example
    /// ```no_run
    /// # use pier_client::ApiClient;
    /// # async fn example() -> pier_client::Result<()> {
    /// let client = ApiClient::new("http://localhost:8080").with_access_token("token");
    /// let page = client.list_pipelines("42").await?;
    /// println!("{} of {}", page.items.len(), page.total_count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_pipelines(&self, project_id: &str) -> Result<ItemsPayload<Pipeline>> {
        let response = self
            .request(Method::GET, "/api/pipelines")
            .query(&[("pid", project_id)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
