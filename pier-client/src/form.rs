//! Auto-submitting HTML form
//!
//! Some navigations have to carry POST data, e.g. handing an SSO `idToken`
//! to the dashboard. [`AutoSubmitForm::render`] produces a standalone page
//! that posts its hidden fields as soon as a browser loads it.

use askama::Template;
use pier_core::OrderedMap;

use crate::error::{ClientError, Result};

#[derive(Template)]
#[template(path = "auto_submit.html")]
struct AutoSubmitPage<'a> {
    action: &'a str,
    method: &'a str,
    params: &'a OrderedMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoSubmitForm {
    action: String,
    method: String,
    params: OrderedMap<String, String>,
}

impl AutoSubmitForm {
    /// Create a form posting `params` to `action`
    ///
    /// # Arguments
    /// * `action` - Target URL
    /// * `method` - `get` or `post`, in any case
    /// * `params` - Hidden fields, rendered in order
    pub fn new(
        action: impl Into<String>,
        method: &str,
        params: OrderedMap<String, String>,
    ) -> Result<Self> {
        let action = action.into();
        if action.is_empty() {
            return Err(ClientError::InvalidRequest("form action is empty".to_string()));
        }

        let method = method.to_ascii_lowercase();
        if method != "get" && method != "post" {
            return Err(ClientError::InvalidRequest(format!(
                "unsupported form method: {}",
                method
            )));
        }

        Ok(Self {
            action,
            method,
            params,
        })
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &OrderedMap<String, String> {
        &self.params
    }

    /// Render the page; attribute values are HTML-escaped
    pub fn render(&self) -> Result<String> {
        let page = AutoSubmitPage {
            action: &self.action,
            method: &self.method,
            params: &self.params,
        };
        Ok(page.render()?)
    }
}
