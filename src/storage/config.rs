use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// No persistence; all operations are no-ops
    None,
    /// File-backed local storage (default)
    Local,
    /// Remote HTTP-backed storage
    Remote,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Local
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Storage backend type
    #[serde(default)]
    pub backend: StorageBackend,

    /// File path for the local backend
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Base URL for the remote backend (e.g. `https://api.example.com/api`)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout for the remote backend, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(backend) = get_env_with_prefix("STORAGE_BACKEND") {
            config.backend = match backend.to_lowercase().as_str() {
                "none" => StorageBackend::None,
                "remote" => StorageBackend::Remote,
                "local" => StorageBackend::Local,
                other => {
                    tracing::warn!(backend = other, "unknown storage backend, using local");
                    StorageBackend::Local
                }
            };
        }

        if let Some(path) = get_env_with_prefix("STORAGE_PATH") {
            config.path = PathBuf::from(path);
        }

        if let Some(url) = get_env_with_prefix("STORAGE_BASE_URL") {
            config.base_url = Some(url);
        }

        if let Some(timeout) = get_env_with_prefix("STORAGE_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse() {
                config.timeout_seconds = seconds;
            }
        }

        config
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("data/subtrack.json")
}

fn default_timeout_seconds() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_local() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Local);
        assert_eq!(config.path, PathBuf::from("data/subtrack.json"));
    }

    #[test]
    fn test_backend_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&StorageBackend::Remote).unwrap(),
            "\"remote\""
        );
        let backend: StorageBackend = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(backend, StorageBackend::None);
    }
}
