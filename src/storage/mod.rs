//! Key-value persistence backends.
//!
//! Three interchangeable implementations of the
//! [`KeyValueStore`](crate::KeyValueStore) contract, selected by
//! [`StorageBackend`] configuration:
//!
//! - [`NoOpStore`]: no persistence medium (non-interactive contexts)
//! - [`LocalStore`]: file-backed JSON map, no network
//! - [`RemoteStore`]: per-key REST endpoints through an injected transport
//!
//! All backends degrade gracefully: persistence failures are logged and turn
//! into absence or no-ops, never errors surfaced to the caller.

mod config;
mod local;
mod noop;
mod remote;

pub use config::{StorageBackend, StorageConfig};
pub use local::LocalStore;
pub use noop::NoOpStore;
pub use remote::{HttpStorageApi, RemoteStore};

use crate::traits::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;

/// Build the key-value store selected by the configuration.
///
/// A remote backend that cannot be constructed (missing base URL, client
/// build failure) falls back to the no-op store: callers run on in-memory
/// defaults rather than failing to start.
pub fn from_config(config: &StorageConfig) -> Arc<dyn KeyValueStore> {
    match config.backend {
        StorageBackend::None => Arc::new(NoOpStore),
        StorageBackend::Local => Arc::new(LocalStore::new(&config.path)),
        StorageBackend::Remote => {
            let Some(base_url) = config.base_url.as_deref() else {
                tracing::warn!(
                    "remote storage backend selected without a base URL, persistence disabled"
                );
                return Arc::new(NoOpStore);
            };
            match HttpStorageApi::with_timeout(
                base_url,
                Duration::from_secs(config.timeout_seconds),
            ) {
                Ok(api) => Arc::new(RemoteStore::new(api)),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "failed to build remote storage client, persistence disabled"
                    );
                    Arc::new(NoOpStore)
                }
            }
        }
    }
}
