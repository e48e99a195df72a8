//! Storage traits for subscription persistence
//!
//! `KeyValueStore` is the uniform contract the subscription store persists
//! through; `StorageApi` is the wire-level transport the remote backend
//! delegates to.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Uniform asynchronous key-value contract used for state persistence.
///
/// Every method is best-effort by design: a missing persistence medium or a
/// transient I/O failure must never raise to the caller. Implementations catch
/// and log failures at the point of occurrence, so `get_item` yields `None`
/// and writes become no-ops rather than errors. Callers supply their own
/// in-memory default when persistence is unavailable.
///
/// Values are pre-serialized JSON strings; the store does not interpret them
/// beyond what a specific backend's wire format requires.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the stored value for a key, or `None` if absent or unreadable.
    async fn get_item(&self, key: &str) -> Option<String>;

    /// Store a value under a key (insert-or-replace, last write wins).
    async fn set_item(&self, key: &str, value: &str);

    /// Remove the value stored under a key, if any.
    async fn remove_item(&self, key: &str);
}

/// Wire-level transport for the remote storage backend.
///
/// Maps onto per-key REST endpoints: `GET|PUT|DELETE /storage/{key}`.
/// Unlike [`KeyValueStore`], transport methods are fallible; the remote
/// backend is the layer that converts failures into absence.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Fetch the value for a key.
    ///
    /// Returns `Ok(None)` when the key is absent (404 or a `null` value);
    /// any other non-success response or connection failure is an `Err`.
    async fn fetch(&self, key: &str) -> Result<Option<Value>>;

    /// Upsert the value for a key.
    async fn store(&self, key: &str, value: Value) -> Result<()>;

    /// Delete the value for a key.
    async fn remove(&self, key: &str) -> Result<()>;
}
