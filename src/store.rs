//! Namespaced key/value persistence.
//!
//! Each [`Store`] is one JSON object on disk at `<state_dir>/<name>.json`.
//! Values are arbitrary serde types; the store only guarantees that a save
//! replaces the file atomically and that the file is readable by its owner
//! alone, since it holds session cookies.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ionic_cli::store::Store;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), ionic_cli::core::IonicError> {
//! let mut store = Store::open(Path::new("/home/me/.ionic"), "cookies").await?;
//! store.set("https://apps.ionicframework.com", &vec!["a", "b"])?;
//! store.save().await?;
//! # Ok(())
//! # }
//! ```

use crate::core::IonicError;
use crate::utils::fs::atomic_write;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A JSON-file-backed namespace of values.
#[derive(Debug, Clone)]
pub struct Store {
    name: String,
    path: PathBuf,
    data: Map<String, Value>,
}

impl Store {
    /// Open the namespace `name` under `state_dir`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object is
    /// logged and treated as empty; it is overwritten on the next save.
    pub async fn open(state_dir: &Path, name: &str) -> Result<Self, IonicError> {
        let path = state_dir.join(format!("{name}.json"));

        let data = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    warn!("Ignoring unreadable store file {}", path.display());
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(IonicError::file_system("read store", &path, &e)),
        };

        debug!("Opened store '{}' with {} entries", name, data.len());
        Ok(Self {
            name: name.to_string(),
            path,
            data,
        })
    }

    /// Namespace name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value under `key`, or `None` if absent or not decodable as `T`.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.data.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Ignoring malformed '{}' entry in store '{}': {}", key, self.name, e);
                None
            }
        }
    }

    /// Replace the value under `key`. Takes effect on disk after [`Store::save`].
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), IonicError> {
        let value = serde_json::to_value(value).map_err(|e| IonicError::Other {
            message: format!("Failed to encode '{key}' for store '{}': {e}", self.name),
        })?;
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Drop `key`; returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.data.remove(key).is_some()
    }

    /// Write the whole namespace to disk atomically.
    pub async fn save(&self) -> Result<(), IonicError> {
        let content = serde_json::to_vec_pretty(&self.data).map_err(|e| IonicError::Other {
            message: format!("Failed to encode store '{}': {e}", self.name),
        })?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || atomic_write(&path, &content, true))
            .await
            .map_err(|e| IonicError::Other {
                message: format!("Store write task failed: {e}"),
            })?
            .map_err(|e| IonicError::FileSystemError {
                operation: "save store".to_string(),
                path: self.path.display().to_string(),
                reason: format!("{e:#}"),
            })?;

        debug!("Saved store '{}' to {}", self.name, self.path.display());
        Ok(())
    }
}
