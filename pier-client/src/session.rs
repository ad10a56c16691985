//! Session plumbing
//!
//! The dashboard keeps the access token in an `accessToken` cookie. These
//! helpers build that cookie, read it back from a `Cookie` header, and decide
//! whether a route needs a signed-in user.

use cookie::{Cookie, SameSite};

use crate::pages::Redirect;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie lifetime: 30 days
pub const ACCESS_TOKEN_MAX_AGE: time::Duration = time::Duration::days(30);

/// Route that does not require a token
pub const LOGIN_PATH: &str = "/login";

/// Build the `accessToken` cookie
///
/// Sent for every path, invisible to scripts, same-site only, and limited to
/// HTTPS when `secure` is set (production).
pub fn access_token_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(ACCESS_TOKEN_MAX_AGE)
        .build()
}

/// Extract the access token from a `Cookie` request header
///
/// Malformed cookie pairs are skipped. An empty value counts as absent.
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(|c| c.ok())
        .find(|c| c.name() == ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Decide whether a request for `path` must be redirected to the login page
///
/// Every route except those under `/login` needs a token.
pub fn guard_route(token: Option<&str>, path: &str) -> Option<Redirect> {
    let has_token = token.is_some_and(|t| !t.is_empty());
    if has_token || path.starts_with(LOGIN_PATH) {
        None
    } else {
        Some(Redirect::to(307, LOGIN_PATH))
    }
}
