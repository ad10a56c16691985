//! Persisted access token
//!
//! [`TokenStore`] holds the current access token and writes every change
//! through to a key/value [`TokenStorage`]. On start it reads the persisted
//! value, falling back to an empty token.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// Storage key the token is persisted under
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// String key/value persistence
pub trait TokenStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Non-persistent storage, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl TokenStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object in a file
///
/// Every write rewrites the whole file. Keys written by other tools are kept.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&raw).map_err(storage_error)? {
            Value::Object(map) => Ok(map),
            _ => Err(ClientError::Storage(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl TokenStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .load()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&map).map_err(storage_error)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), key, "Persisted storage item");
        Ok(())
    }
}

fn storage_error(err: serde_json::Error) -> ClientError {
    ClientError::Storage(err.to_string())
}

/// Current access token with write-through persistence
#[derive(Debug)]
pub struct TokenStore<S> {
    storage: S,
    token: String,
}

impl<S: TokenStorage> TokenStore<S> {
    /// Read the persisted token, or start empty
    ///
    /// An unreadable storage is logged and treated as empty.
    pub fn init(storage: S) -> Self {
        let token = match storage.get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Could not read persisted access token");
                String::new()
            }
        };
        Self { storage, token }
    }

    pub fn get(&self) -> &str {
        &self.token
    }

    pub fn is_set(&self) -> bool {
        !self.token.is_empty()
    }

    /// Replace the token and persist it
    ///
    /// The in-memory value is only updated once the write succeeded.
    pub fn set(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.storage.set_item(ACCESS_TOKEN_KEY, &token)?;
        self.token = token;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.set(String::new())
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_defaults_to_empty() {
        let store = TokenStore::init(MemoryStorage::default());
        assert_eq!(store.get(), "");
        assert!(!store.is_set());
    }

    #[test]
    fn test_set_writes_through() {
        let mut store = TokenStore::init(MemoryStorage::default());
        store.set("tok").unwrap();
        assert!(store.is_set());

        let storage = store.into_storage();
        assert_eq!(
            storage.get_item(ACCESS_TOKEN_KEY).unwrap(),
            Some("tok".to_string())
        );
        assert_eq!(storage.get_item("theme").unwrap(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("storage.json");

        let mut store = TokenStore::init(FileStorage::new(&path));
        assert_eq!(store.get(), "");
        store.set("persisted").unwrap();

        let reopened = TokenStore::init(FileStorage::new(&path));
        assert_eq!(reopened.get(), "persisted");
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"lang":"en"}"#).unwrap();

        let mut storage = FileStorage::new(&path);
        storage.set_item(ACCESS_TOKEN_KEY, "tok").unwrap();

        assert_eq!(storage.get_item("lang").unwrap(), Some("en".to_string()));
        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), Some("tok".to_string()));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item(ACCESS_TOKEN_KEY),
            Err(ClientError::Storage(_))
        ));
        assert_eq!(TokenStore::init(storage).get(), "");
    }

    #[test]
    fn test_clear() {
        let mut store = TokenStore::init(MemoryStorage::default());
        store.set("tok").unwrap();
        store.clear().unwrap();
        assert!(!store.is_set());
    }
}
