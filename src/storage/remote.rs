//! Remote HTTP-backed storage.
//!
//! Delegates to per-key REST endpoints (`GET|PUT|DELETE /storage/{key}`)
//! through the [`StorageApi`] transport seam. [`HttpStorageApi`] is the
//! production transport; tests inject a mock.

use crate::error::Result;
use crate::subscriptions::{default_subscriptions, SUBSCRIPTION_STORAGE_KEY};
use crate::traits::storage::{KeyValueStore, StorageApi};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default request timeout for the HTTP transport.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire envelope for storage values: `{"value": <json>}`.
#[derive(Debug, Serialize, Deserialize)]
struct StorageEnvelope {
    #[serde(default)]
    value: Value,
}

/// Reqwest-based [`StorageApi`] implementation.
pub struct HttpStorageApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStorageApi {
    /// Create a transport against the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a transport with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, key: &str) -> String {
        format!("{}/storage/{}", self.base_url, key)
    }
}

#[async_trait]
impl StorageApi for HttpStorageApi {
    async fn fetch(&self, key: &str) -> Result<Option<Value>> {
        let response = self.client.get(self.url(key)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: StorageEnvelope = response.error_for_status()?.json().await?;
        Ok(match envelope.value {
            Value::Null => None,
            value => Some(value),
        })
    }

    async fn store(&self, key: &str, value: Value) -> Result<()> {
        self.client
            .put(self.url(key))
            .json(&StorageEnvelope { value })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.client
            .delete(self.url(key))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Remote key-value store over an injected [`StorageApi`] transport.
///
/// `get_item` re-serializes the structured wire value back to a string for
/// the caller's JSON deserialization layer; `set_item` parses the caller's
/// string so the wire carries a structured value rather than a double-encoded
/// string. Transport failures are logged and swallowed.
///
/// Writes are upserts keyed by `key`; concurrent writers resolve by
/// last-write-wins at the backend, values are never merged.
pub struct RemoteStore<A: StorageApi> {
    api: A,
}

impl<A: StorageApi> RemoteStore<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: StorageApi> KeyValueStore for RemoteStore<A> {
    async fn get_item(&self, key: &str) -> Option<String> {
        match self.api.fetch(key).await {
            Ok(value) => substitute_defaults(key, value).map(|v| v.to_string()),
            Err(err) => {
                tracing::warn!(key, error = %err, "remote storage read failed");
                None
            }
        }
    }

    async fn set_item(&self, key: &str, value: &str) {
        let value: Value = match serde_json::from_str(value) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "value is not valid JSON, skipping remote write");
                return;
            }
        };

        if let Err(err) = self.api.store(key, value).await {
            tracing::warn!(key, error = %err, "remote storage write failed");
        }
    }

    async fn remove_item(&self, key: &str) {
        if let Err(err) = self.api.remove(key).await {
            tracing::warn!(key, error = %err, "remote storage delete failed");
        }
    }
}

/// First-run seeding for the well-known subscription-list key.
///
/// An absent record or an empty collection under that one key is replaced by
/// the canonical default-subscriptions payload; every other key passes
/// through untouched.
fn substitute_defaults(key: &str, value: Option<Value>) -> Option<Value> {
    let empty = match &value {
        None => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    };

    if key == SUBSCRIPTION_STORAGE_KEY && empty {
        return serde_json::to_value(default_subscriptions()).ok();
    }

    value
}
