//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod auth;
mod form;
mod pipeline;
mod project;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use pier_client::pages::PageResult;
use pier_core::domain::epoch_to_datetime;
use pier_core::pairs::split_pair;
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Signin {
        #[arg(long)]
        email: String,

        #[arg(long, env = "PIER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in with an identity-provider ID token
    SigninSso {
        #[arg(long)]
        id_token: String,
    },
    /// Forget the stored access token
    Signout,
    /// Show the signed-in user
    Whoami,
    /// List the pipelines of a project
    Pipelines {
        /// Project id
        #[arg(long)]
        pid: String,
    },
    /// List projects
    Projects,
    /// Show a project and its members
    Project {
        slug: String,
    },
    /// Show one task of a pipeline
    Task {
        pipeline_id: String,
        task_id: String,

        /// Project the pipeline belongs to
        #[arg(long)]
        pid: String,

        /// Environment overrides for a deploy task (KEY=value)
        #[arg(short, long, value_parser = parse_key_val)]
        env: Vec<(String, String)>,

        /// Print the task update body as JSON instead of the details
        #[arg(long)]
        json: bool,
    },
    /// Print the Set-Cookie value for the stored access token
    Cookie,
    /// Render a page that auto-submits a form
    Form {
        /// Target URL
        #[arg(long)]
        action: String,

        #[arg(long, default_value = "post")]
        method: String,

        /// Hidden fields as key=value pairs
        #[arg(short, long, value_parser = parse_key_val)]
        param: Vec<(String, String)>,

        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Signin { email, password } => auth::sign_in(config, email, password).await,
        Commands::SigninSso { id_token } => auth::sign_in_sso(config, &id_token).await,
        Commands::Signout => auth::sign_out(config),
        Commands::Whoami => auth::whoami(config).await,
        Commands::Pipelines { pid } => pipeline::list_pipelines(config, &pid).await,
        Commands::Projects => project::list_projects(config).await,
        Commands::Project { slug } => project::show_project(config, &slug).await,
        Commands::Task {
            pipeline_id,
            task_id,
            pid,
            env,
            json,
        } => pipeline::show_task(config, &pid, &pipeline_id, &task_id, env, json).await,
        Commands::Cookie => auth::print_cookie(config),
        Commands::Form {
            action,
            method,
            param,
            out,
        } => form::render_form(action, &method, param, out),
    }
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = split_pair(s)
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    if key.is_empty() {
        anyhow::bail!("invalid KEY=value: empty key in `{}`", s);
    }
    Ok((key.to_string(), value.to_string()))
}

/// Turn a sign-in redirect into an error telling the user what to do
fn require_page<T>(page: PageResult<T>) -> Result<T> {
    page.map_err(|redirect| {
        anyhow::anyhow!(
            "Not signed in (redirected to {}). Run `pier signin` first.",
            redirect.location
        )
    })
}

/// Format an epoch-seconds timestamp for display
fn format_time(epoch: Option<i64>) -> String {
    epoch_to_datetime(epoch)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Colorize a free-form status for display
fn colorize_status(status: &str) -> ColoredString {
    match status.to_ascii_lowercase().as_str() {
        "success" | "succeeded" | "completed" | "done" => status.green(),
        "failed" | "error" | "stopped" | "cancelled" => status.red(),
        "running" | "pending" | "scheduled" | "queued" => status.yellow(),
        "" => "unknown".dimmed(),
        _ => status.normal(),
    }
}
