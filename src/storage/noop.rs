use crate::traits::storage::KeyValueStore;
use async_trait::async_trait;

/// No-op store for contexts without a persistence medium
///
/// All operations succeed but store nothing; `get_item` always returns
/// absence. Callers fall back to their built-in defaults.
#[derive(Clone, Default)]
pub struct NoOpStore;

#[async_trait]
impl KeyValueStore for NoOpStore {
    async fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set_item(&self, _key: &str, _value: &str) {}

    async fn remove_item(&self, _key: &str) {}
}
