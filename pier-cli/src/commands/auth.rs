//! Authentication command handlers
//!
//! Sign-in stores the issued access token under the state directory; every
//! other command picks it up from there.

use anyhow::{Context, Result};
use colored::*;
use pier_client::pages::{self, SignedIn};
use pier_client::session::access_token_cookie;
use pier_core::dto::auth::Credentials;
use tracing::info;

use super::{format_time, require_page};
use crate::config::Config;

/// Sign in with email and password
pub async fn sign_in(config: &Config, email: String, password: String) -> Result<()> {
    let client = config.api_client();
    let credentials = Credentials::new(email, password);

    let signed_in = pages::sign_in(&client, &credentials)
        .await
        .map_err(|failure| {
            anyhow::anyhow!("Sign-in failed (status {}): invalid credentials", failure.status)
        })?;

    store_token(config, signed_in)
}

/// Sign in with an identity-provider ID token
pub async fn sign_in_sso(config: &Config, id_token: &str) -> Result<()> {
    let client = config.api_client();

    let signed_in = pages::sign_in_sso(&client, id_token)
        .await
        .map_err(|failure| {
            anyhow::anyhow!("SSO sign-in failed (status {}): invalid token", failure.status)
        })?;

    store_token(config, signed_in)
}

fn store_token(config: &Config, signed_in: SignedIn) -> Result<()> {
    let mut store = config.token_store();
    store
        .set(signed_in.authentication.access_token)
        .with_context(|| format!("Failed to save token to {}", config.token_path().display()))?;
    info!(user_id = %signed_in.authentication.user_id, "Signed in");

    println!("{}", "✓ Signed in successfully!".green().bold());
    println!("  User ID: {}", signed_in.authentication.user_id.cyan());
    println!("  Next:    {}", signed_in.redirect.location.dimmed());

    Ok(())
}

/// Forget the stored access token
pub fn sign_out(config: &Config) -> Result<()> {
    let mut store = config.token_store();
    if !store.is_set() {
        println!("{}", "Not signed in.".yellow());
        return Ok(());
    }

    store
        .clear()
        .with_context(|| format!("Failed to update {}", config.token_path().display()))?;
    println!("{}", "✓ Signed out.".green().bold());

    Ok(())
}

/// Show the signed-in user
pub async fn whoami(config: &Config) -> Result<()> {
    let client = config.api_client();
    let page = require_page(pages::load_home(&client).await)?;

    let Some(user) = page.user else {
        println!("{}", "Could not load the current user.".yellow());
        return Ok(());
    };

    println!("{}", "Signed in as:".bold());
    println!("  ID:      {}", user.id.cyan());
    if !user.name.is_empty() {
        println!("  Name:    {}", user.name.bold());
    }
    println!("  Email:   {}", user.email);
    if !user.contact_email.is_empty() && user.contact_email != user.email {
        println!("  Contact: {}", user.contact_email.dimmed());
    }
    println!("  Joined:  {}", format_time(user.created_at).dimmed());

    Ok(())
}

/// Print the `Set-Cookie` value for the stored token
pub fn print_cookie(config: &Config) -> Result<()> {
    let store = config.token_store();
    if !store.is_set() {
        anyhow::bail!("No access token stored. Run `pier signin` first.");
    }

    println!("{}", access_token_cookie(store.get(), config.production));

    Ok(())
}
