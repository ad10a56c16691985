//! CLI configuration
//!
//! Resolved from global flags, each of which falls back to an environment
//! variable (see `main.rs`).

use pier_client::ApiClient;
use pier_client::token_store::{FileStorage, TokenStore};
use std::path::PathBuf;

/// Name of the key/value file holding the access token
const STORAGE_FILE: &str = "storage.json";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API (e.g., "http://localhost:8080")
    pub api_url: String,

    /// Directory holding persisted CLI state
    pub state_dir: PathBuf,

    /// Emit `Secure` cookies
    pub production: bool,
}

impl Config {
    /// Build a configuration, defaulting the state directory to `$HOME/.pier`
    pub fn new(
        api_url: String,
        state_dir: Option<PathBuf>,
        production: bool,
    ) -> anyhow::Result<Self> {
        let state_dir = match state_dir {
            Some(dir) => dir,
            None => default_state_dir()?,
        };

        Ok(Self {
            api_url,
            state_dir,
            production,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.state_dir.as_os_str().is_empty() {
            anyhow::bail!("state_dir cannot be empty");
        }

        Ok(())
    }

    pub fn token_path(&self) -> PathBuf {
        self.state_dir.join(STORAGE_FILE)
    }

    /// Open the persisted token store
    pub fn token_store(&self) -> TokenStore<FileStorage> {
        TokenStore::init(FileStorage::new(self.token_path()))
    }

    /// API client carrying the stored token, if any
    pub fn api_client(&self) -> ApiClient {
        let store = self.token_store();
        ApiClient::new(&self.api_url).with_access_token(store.get())
    }
}

fn default_state_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .ok_or_else(|| anyhow::anyhow!("HOME is not set; pass --state-dir or set PIER_STATE_DIR"))?;
    Ok(PathBuf::from(home).join(".pier"))
}
