//! Page loaders
//!
//! Each loader fetches what one dashboard page shows and reshapes it for
//! display. Loaders never fail on API errors: a failed request is logged and
//! the page comes back empty. The one exception is `401`, which asks the
//! caller to send the user to the sign-in page.

use pier_core::domain::pipeline::Pipeline;
use pier_core::domain::project::Project;
use pier_core::domain::user::{Authentication, User};
use pier_core::dto::auth::Credentials;
use serde::Serialize;
use tracing::{error, info};

use crate::ApiClient;
use crate::error::{ClientError, Result};

/// Where unauthenticated API calls send the user
pub const SIGN_IN_PATH: &str = "/signin";
/// Landing page after a successful sign-in
pub const AFTER_SIGN_IN_PATH: &str = "/projects";

/// A navigation the caller should perform instead of rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub status: u16,
    pub location: String,
}

impl Redirect {
    pub fn to(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: location.into(),
        }
    }

    pub fn sign_in() -> Self {
        Self::to(302, SIGN_IN_PATH)
    }
}

impl std::fmt::Display for Redirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.location)
    }
}

pub type PageResult<T> = std::result::Result<T, Redirect>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomePage {
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelinesPage {
    pub pipelines: Vec<Pipeline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectsPage {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectPage {
    pub project: Option<Project>,
    /// Members of the project, as returned by the users endpoint
    pub users: Vec<User>,
}

/// Form-action failure, shown next to the sign-in form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionFailure {
    pub status: u16,
    pub invalid: bool,
}

impl ActionFailure {
    fn invalid() -> Self {
        Self {
            status: 400,
            invalid: true,
        }
    }
}

/// Successful sign-in: the tokens plus where to go next
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub authentication: Authentication,
    pub redirect: Redirect,
}

/// Apply the loader error policy to one API call
fn settle<T: Default>(page: &'static str, result: Result<T>) -> PageResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(ClientError::Unauthorized) => {
            info!(page, "Access token rejected, redirecting to sign-in");
            Err(Redirect::sign_in())
        }
        Err(e) if e.is_server_error() => {
            error!(page, error = %e, "API server error");
            Ok(T::default())
        }
        Err(e) if e.is_client_error() => {
            info!(page, error = %e, "API request did not succeed");
            Ok(T::default())
        }
        Err(e) => {
            error!(page, error = %e, "Failed to load page data");
            Ok(T::default())
        }
    }
}

/// Load the signed-in user for the home page
pub async fn load_home(client: &ApiClient) -> PageResult<HomePage> {
    let user = settle("home", client.current_user().await.map(Some))?;
    Ok(HomePage { user })
}

/// Load the pipelines of one project
///
/// # Arguments
/// * `project_id` - The `pid` of the project
pub async fn load_pipelines(client: &ApiClient, project_id: &str) -> PageResult<PipelinesPage> {
    let payload = settle("pipelines", client.list_pipelines(project_id).await)?;
    Ok(PipelinesPage {
        pipelines: payload.items,
    })
}

/// Load every project visible to the user
pub async fn load_projects(client: &ApiClient) -> PageResult<ProjectsPage> {
    let payload = settle("projects", client.list_projects().await)?;
    Ok(ProjectsPage {
        projects: payload.items,
    })
}

/// Load one project and the users behind its members
///
/// If the project cannot be loaded the page is empty and no user lookup is
/// made. A failed user lookup leaves `users` empty.
pub async fn load_project(client: &ApiClient, slug: &str) -> PageResult<ProjectPage> {
    let Some(project) = settle("project", client.get_project(slug).await.map(Some))? else {
        return Ok(ProjectPage::default());
    };

    let users = settle("project", client.list_users(&project.member_ids()).await)?.items;

    Ok(ProjectPage {
        project: Some(project),
        users,
    })
}

/// Sign in with email and password
///
/// Missing fields, a non-200 answer and a rejected envelope all produce the
/// same `400 invalid` failure.
pub async fn sign_in(
    client: &ApiClient,
    credentials: &Credentials,
) -> std::result::Result<SignedIn, ActionFailure> {
    if credentials.validate().is_err() {
        return Err(ActionFailure::invalid());
    }
    signed_in(client.authenticate(credentials).await)
}

/// Sign in with an identity-provider ID token
pub async fn sign_in_sso(
    client: &ApiClient,
    id_token: &str,
) -> std::result::Result<SignedIn, ActionFailure> {
    if id_token.is_empty() {
        return Err(ActionFailure::invalid());
    }
    signed_in(client.authenticate_sso(id_token).await)
}

fn signed_in(result: Result<Authentication>) -> std::result::Result<SignedIn, ActionFailure> {
    match result {
        Ok(authentication) => Ok(SignedIn {
            authentication,
            redirect: Redirect::to(302, AFTER_SIGN_IN_PATH),
        }),
        Err(e) => {
            info!(error = %e, "Sign-in failed");
            Err(ActionFailure::invalid())
        }
    }
}
