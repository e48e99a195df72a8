//! End-to-end tests wiring the subscription store to real storage backends.

use std::path::PathBuf;
use std::sync::Arc;
use subtrack::subscriptions::default_subscriptions;
use subtrack::{
    storage, BillingCycle, KeyValueStore, NewSubscription, StorageBackend, StorageConfig,
    SubscriptionStore,
};
use uuid::Uuid;

fn temp_config() -> (StorageConfig, PathBuf) {
    let path = std::env::temp_dir().join(format!("subtrack_it_{}.json", Uuid::new_v4()));
    let config = StorageConfig {
        backend: StorageBackend::Local,
        path: path.clone(),
        ..StorageConfig::default()
    };
    (config, path)
}

#[tokio::test]
async fn test_first_run_starts_on_defaults() {
    let (config, path) = temp_config();
    let kv = storage::from_config(&config);

    let mut store = SubscriptionStore::new(kv);
    store.load().await;
    assert_eq!(store.subscriptions(), default_subscriptions());

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_changes_survive_across_store_instances() {
    let (config, path) = temp_config();

    {
        let kv = storage::from_config(&config);
        let mut store = SubscriptionStore::new(kv);
        store.load().await;

        store
            .add(
                NewSubscription::new("Figma", 12.0, "USD", "https://figma.com")
                    .billing_cycle(BillingCycle::Monthly)
                    .payment_day(15),
            )
            .await;
        store.remove("1").await.unwrap();
    }

    let kv = storage::from_config(&config);
    let mut reopened = SubscriptionStore::new(kv);
    reopened.load().await;

    assert_eq!(reopened.subscriptions().len(), 10);
    assert!(!reopened.subscriptions().iter().any(|s| s.id == "1"));

    let figma = reopened
        .subscriptions()
        .iter()
        .find(|s| s.name == "Figma")
        .expect("added subscription survived the reload");
    assert_eq!(figma.billing_cycle, Some(BillingCycle::Monthly));
    assert!(figma.next_payment_date.is_some());

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_none_backend_forgets_everything() {
    let config = StorageConfig {
        backend: StorageBackend::None,
        ..StorageConfig::default()
    };

    {
        let kv = storage::from_config(&config);
        let mut store = SubscriptionStore::new(kv);
        store.load().await;
        store
            .add(NewSubscription::new("Figma", 12.0, "USD", "https://figma.com"))
            .await;
        assert_eq!(store.subscriptions().len(), 11);
    }

    let kv = storage::from_config(&config);
    let mut store = SubscriptionStore::new(kv);
    store.load().await;
    assert_eq!(store.subscriptions(), default_subscriptions());
}

#[tokio::test]
async fn test_raw_kv_contract_on_the_local_backend() {
    let (config, path) = temp_config();
    let kv: Arc<dyn KeyValueStore> = storage::from_config(&config);

    assert_eq!(kv.get_item("missing").await, None);

    kv.set_item("k", "\"v\"").await;
    assert_eq!(kv.get_item("k").await, Some("\"v\"".to_string()));

    kv.remove_item("k").await;
    assert_eq!(kv.get_item("k").await, None);

    let _ = tokio::fs::remove_file(&path).await;
}
