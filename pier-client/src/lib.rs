//! Pier HTTP Client
//!
//! A type-safe HTTP client for the deployment API behind the Pier dashboard,
//! plus the glue that turns API responses into displayable pages.
//!
//! # Example
//!
//! ```no_run
//! use pier_client::ApiClient;
//! use pier_client::pages::load_pipelines;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::new("http://localhost:8080").with_access_token("token");
//!
//!     match load_pipelines(&client, "42").await {
//!         Ok(page) => println!("{} pipeline(s)", page.pipelines.len()),
//!         Err(redirect) => println!("sign in first: {}", redirect.location),
//!     }
//! }
//! ```

mod auth;
pub mod envelope;
pub mod error;
pub mod form;
pub mod pages;
mod pipelines;
mod projects;
pub mod session;
pub mod token_store;
mod users;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use pages::Redirect;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the deployment API
///
/// Requests to paths under `/api` carry `Authorization: Bearer <token>` when
/// an access token has been attached with [`ApiClient::with_access_token`].
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL of the API (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use pier_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    /// Pier itself never sets a timeout.
    ///
    /// # Example
    /// ```
    /// use pier_client::ApiClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ApiClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            access_token: None,
        }
    }

    /// Attach the access token sent as a bearer token
    ///
    /// An empty token is treated as no token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Start a request to `path`, adding the bearer token for `/api` paths
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending request");

        let builder = self.client.request(method, &url);
        match &self.access_token {
            Some(token) if path.starts_with("/api") => builder.bearer_auth(token),
            _ => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and unwrap its envelope
    ///
    /// `401` maps to [`ClientError::Unauthorized`], other failures to
    /// [`ClientError::ApiError`]. A successful body is decoded as an
    /// envelope after key-case normalization, and its payload is returned.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))?;

        envelope::unwrap_payload(body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_access_token", &self.has_access_token())
            .finish()
    }
}
