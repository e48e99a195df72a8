//! File-backed local storage.
//!
//! Persists the key-value map as a single pretty-printed JSON object on disk.
//! Values are stored verbatim as the pre-serialized strings the caller
//! supplies; the file itself is the only serialization this backend adds.

use crate::traits::storage::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Local key-value store backed by a JSON file.
///
/// Reads go straight to disk; writes take a read-modify-write pass under an
/// internal mutex so concurrent writers within the process don't clobber each
/// other's keys. Across processes the discipline is last write wins, matching
/// the rest of the storage layer.
///
/// A missing file is an empty map. I/O and parse failures are logged and
/// degrade to absence/no-op per the [`KeyValueStore`] contract.
pub struct LocalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Create a store persisting to the given file path.
    ///
    /// The file (and its parent directory) is created lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> HashMap<String, String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read storage file");
                return HashMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "storage file is not a valid JSON map");
            HashMap::new()
        })
    }

    async fn write_map(&self, map: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = tokio::fs::create_dir_all(parent).await {
                    tracing::warn!(path = %parent.display(), error = %err, "failed to create storage directory");
                    return;
                }
            }
        }

        let raw = match serde_json::to_string_pretty(map) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize storage map");
                return;
            }
        };

        if let Err(err) = tokio::fs::write(&self.path, raw).await {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to write storage file");
        }
    }
}

#[async_trait]
impl KeyValueStore for LocalStore {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.read_map().await.get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: &str) {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await;
    }

    async fn remove_item(&self, key: &str) {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await;
        if map.remove(key).is_some() {
            self.write_map(&map).await;
        }
    }
}
