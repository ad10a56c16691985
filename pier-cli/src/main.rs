//! Pier CLI
//!
//! Command-line interface for the deployment dashboard API: sign in, browse
//! projects and pipelines, and inspect tasks.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pier")]
#[command(about = "Pier deployment dashboard CLI", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(
        long,
        global = true,
        env = "PIER_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    /// Directory for persisted state [default: $HOME/.pier]
    #[arg(long, global = true, env = "PIER_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Issue `Secure` cookies
    #[arg(long, global = true, env = "PIER_PRODUCTION")]
    production: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pier_cli=info,pier_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.api_url, cli.state_dir, cli.production)?;
    config.validate()?;
    debug!(
        "Loaded configuration: api_url={}, state_dir={}",
        config.api_url,
        config.state_dir.display()
    );

    handle_command(cli.command, &config).await
}
