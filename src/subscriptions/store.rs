//! The subscription store.
//!
//! Owns an immutable snapshot of the subscription list and an injected
//! [`KeyValueStore`]. Every mutation builds a fresh snapshot and then
//! explicitly persists it; nothing is intercepted implicitly.

use super::defaults::default_subscriptions;
use super::model::{NewSubscription, Subscription, SubscriptionUpdate};
use super::SUBSCRIPTION_STORAGE_KEY;
use crate::currency::RateTable;
use crate::error::{Result, SubtrackError};
use crate::schedule::{calculate_next_payment_date, initialize_next_payment_date};
use crate::traits::storage::KeyValueStore;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory subscription list with explicit persistence.
///
/// The store starts on the built-in defaults; call [`load`](Self::load) to
/// hydrate from the configured backend. Persistence is best-effort: a failed
/// write leaves the in-memory snapshot authoritative and the next successful
/// write converges the backend (last write wins).
pub struct SubscriptionStore {
    subscriptions: Arc<Vec<Subscription>>,
    storage: Arc<dyn KeyValueStore>,
}

impl SubscriptionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            subscriptions: Arc::new(default_subscriptions()),
            storage,
        }
    }

    /// Current snapshot of the subscription list.
    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Cheap shareable handle to the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Subscription>> {
        Arc::clone(&self.subscriptions)
    }

    /// Hydrate the list from the persistence backend.
    ///
    /// An absent, empty, or corrupt persisted payload degrades to the
    /// built-in defaults; this path never fails. Lapsed next-payment-dates
    /// are rolled forward after hydration.
    pub async fn load(&mut self) {
        let loaded = match self.storage.get_item(SUBSCRIPTION_STORAGE_KEY).await {
            Some(raw) => match serde_json::from_str::<Vec<Subscription>>(&raw) {
                Ok(list) if !list.is_empty() => Some(list),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(error = %err, "persisted subscription list is corrupt, using defaults");
                    None
                }
            },
            None => None,
        };

        self.subscriptions = Arc::new(loaded.unwrap_or_else(default_subscriptions));
        self.refresh_payment_dates().await;
    }

    /// Add a subscription, assigning it a fresh id.
    ///
    /// When a billing cycle is set and no next-payment-date was supplied, the
    /// initial date is computed one cadence unit ahead of today.
    pub async fn add(&mut self, new: NewSubscription) -> Subscription {
        let next_payment_date = new
            .next_payment_date
            .or_else(|| initialize_next_payment_date(new.billing_cycle, new.payment_day));

        let subscription = Subscription {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            price: new.price,
            currency: new.currency,
            domain: new.domain,
            icon: new.icon,
            billing_cycle: new.billing_cycle,
            payment_day: new.payment_day,
            next_payment_date,
            show_next_payment: new.show_next_payment,
        };

        let mut list = self.subscriptions.as_ref().clone();
        list.push(subscription.clone());
        self.subscriptions = Arc::new(list);
        self.persist().await;

        subscription
    }

    /// Apply a partial update to the subscription with the given id.
    ///
    /// Changing the billing cycle or payment day recomputes the
    /// next-payment-date; a still-valid future date is kept as-is.
    pub async fn edit(&mut self, id: &str, update: SubscriptionUpdate) -> Result<Subscription> {
        let mut list = self.subscriptions.as_ref().clone();
        let subscription = list
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SubtrackError::not_found(format!("Subscription {id}")))?;

        let billing_changed = update
            .billing_cycle
            .is_some_and(|c| Some(c) != subscription.billing_cycle)
            || update
                .payment_day
                .is_some_and(|d| Some(d) != subscription.payment_day);

        if let Some(name) = update.name {
            subscription.name = name;
        }
        if let Some(price) = update.price {
            subscription.price = price;
        }
        if let Some(currency) = update.currency {
            subscription.currency = currency;
        }
        if let Some(domain) = update.domain {
            subscription.domain = domain;
        }
        if let Some(icon) = update.icon {
            subscription.icon = Some(icon);
        }
        if let Some(cycle) = update.billing_cycle {
            subscription.billing_cycle = Some(cycle);
        }
        if let Some(day) = update.payment_day {
            subscription.payment_day = Some(day);
        }
        if let Some(date) = update.next_payment_date {
            subscription.next_payment_date = Some(date);
        }
        if let Some(show) = update.show_next_payment {
            subscription.show_next_payment = Some(show);
        }

        if billing_changed {
            subscription.next_payment_date = calculate_next_payment_date(
                subscription.billing_cycle,
                subscription.payment_day,
                subscription.next_payment_date,
            );
        }

        let updated = subscription.clone();
        self.subscriptions = Arc::new(list);
        self.persist().await;

        Ok(updated)
    }

    /// Remove the subscription with the given id.
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        let mut list = self.subscriptions.as_ref().clone();
        let before = list.len();
        list.retain(|s| s.id != id);
        if list.len() == before {
            return Err(SubtrackError::not_found(format!("Subscription {id}")));
        }

        self.subscriptions = Arc::new(list);
        self.persist().await;
        Ok(())
    }

    /// Serialize the current list as pretty-printed JSON.
    pub fn export(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.subscriptions.as_ref())?)
    }

    /// Replace the list with an imported JSON payload.
    ///
    /// This is the one boundary where malformed data is surfaced as an error
    /// rather than swallowed: silently accepting a corrupt import would
    /// corrupt the in-memory list. The current state is untouched on failure.
    pub async fn import(&mut self, data: &str) -> Result<()> {
        let list: Vec<Subscription> = serde_json::from_str(data)?;

        self.subscriptions = Arc::new(list);
        self.persist().await;
        Ok(())
    }

    /// Restore the built-in default list.
    pub async fn reset_to_defaults(&mut self) {
        self.subscriptions = Arc::new(default_subscriptions());
        self.persist().await;
    }

    /// Roll forward any lapsed next-payment-dates.
    ///
    /// Entries without a billing cycle have no schedule and lose any stale
    /// date they may carry. Persists only when something changed.
    pub async fn refresh_payment_dates(&mut self) {
        let mut list = self.subscriptions.as_ref().clone();
        let mut changed = false;

        for subscription in &mut list {
            let next = calculate_next_payment_date(
                subscription.billing_cycle,
                subscription.payment_day,
                subscription.next_payment_date,
            );
            if next != subscription.next_payment_date {
                subscription.next_payment_date = next;
                changed = true;
            }
        }

        if changed {
            self.subscriptions = Arc::new(list);
            self.persist().await;
        }
    }

    /// Running total of all subscription prices converted to `currency`.
    ///
    /// Entries whose currency is missing from the rate table are skipped.
    #[must_use]
    pub fn total_in(&self, rates: &RateTable, currency: &str) -> f64 {
        self.subscriptions
            .iter()
            .filter_map(|s| rates.convert(s.price, &s.currency, currency))
            .sum()
    }

    async fn persist(&self) {
        match serde_json::to_string(self.subscriptions.as_ref()) {
            Ok(raw) => self.storage.set_item(SUBSCRIPTION_STORAGE_KEY, &raw).await,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize subscriptions for persistence");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::BillingCycle;
    use async_trait::async_trait;
    use chrono::{Local, NaiveDate};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory key-value store for exercising persistence.
    #[derive(Default)]
    struct MemoryStore {
        map: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MemoryStore {
        async fn get_item(&self, key: &str) -> Option<String> {
            self.map.lock().unwrap().get(key).cloned()
        }

        async fn set_item(&self, key: &str, value: &str) {
            self.map
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        async fn remove_item(&self, key: &str) {
            self.map.lock().unwrap().remove(key);
        }
    }

    fn memory_store() -> (SubscriptionStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::default());
        (SubscriptionStore::new(storage.clone()), storage)
    }

    fn persisted_list(storage: &MemoryStore) -> Vec<Subscription> {
        let raw = storage
            .map
            .lock()
            .unwrap()
            .get(SUBSCRIPTION_STORAGE_KEY)
            .cloned()
            .expect("nothing persisted");
        serde_json::from_str(&raw).unwrap()
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    #[tokio::test]
    async fn test_new_store_starts_on_defaults() {
        let (store, _) = memory_store();
        assert_eq!(store.subscriptions(), default_subscriptions());
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_persists() {
        let (mut store, storage) = memory_store();

        let added = store
            .add(NewSubscription::new("Figma", 12.0, "USD", "https://figma.com"))
            .await;
        assert!(!added.id.is_empty());
        assert_eq!(store.subscriptions().len(), 11);

        let persisted = persisted_list(&storage);
        assert!(persisted.iter().any(|s| s.name == "Figma"));
    }

    #[tokio::test]
    async fn test_add_with_cycle_initializes_next_payment_date() {
        let (mut store, _) = memory_store();

        let added = store
            .add(
                NewSubscription::new("GitHub", 4.0, "USD", "https://github.com")
                    .billing_cycle(BillingCycle::Daily),
            )
            .await;

        let next = added.next_payment_date.unwrap();
        assert!(next > today());
    }

    #[tokio::test]
    async fn test_add_without_cycle_has_no_schedule() {
        let (mut store, _) = memory_store();

        let added = store
            .add(NewSubscription::new("Figma", 12.0, "USD", "https://figma.com"))
            .await;
        assert_eq!(added.next_payment_date, None);
    }

    #[tokio::test]
    async fn test_add_keeps_a_supplied_date() {
        let (mut store, _) = memory_store();
        let chosen = today() + chrono::Days::new(90);

        let mut new = NewSubscription::new("Figma", 12.0, "USD", "https://figma.com")
            .billing_cycle(BillingCycle::Monthly);
        new.next_payment_date = Some(chosen);

        let added = store.add(new).await;
        assert_eq!(added.next_payment_date, Some(chosen));
    }

    #[tokio::test]
    async fn test_edit_patches_fields() {
        let (mut store, storage) = memory_store();

        let updated = store
            .edit(
                "1",
                SubscriptionUpdate {
                    price: Some(17.99),
                    ..SubscriptionUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Netflix");
        assert_eq!(updated.price, 17.99);
        // Non-billing edits leave the schedule alone
        assert_eq!(updated.next_payment_date, None);

        let persisted = persisted_list(&storage);
        assert_eq!(persisted[0].price, 17.99);
    }

    #[tokio::test]
    async fn test_edit_unknown_id_is_not_found() {
        let (mut store, _) = memory_store();
        let err = store
            .edit("missing", SubscriptionUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubtrackError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_billing_cycle_recomputes_schedule() {
        let (mut store, _) = memory_store();

        let updated = store
            .edit(
                "1",
                SubscriptionUpdate {
                    billing_cycle: Some(BillingCycle::Monthly),
                    payment_day: Some(15),
                    ..SubscriptionUpdate::default()
                },
            )
            .await
            .unwrap();

        let next = updated.next_payment_date.unwrap();
        assert!(next > today());
        assert_eq!(next.format("%d").to_string(), "15");
    }

    #[tokio::test]
    async fn test_remove_deletes_and_persists() {
        let (mut store, storage) = memory_store();

        store.remove("1").await.unwrap();
        assert_eq!(store.subscriptions().len(), 9);
        assert!(!store.subscriptions().iter().any(|s| s.id == "1"));
        assert_eq!(persisted_list(&storage).len(), 9);

        let err = store.remove("1").await.unwrap_err();
        assert!(matches!(err, SubtrackError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let (mut store, _) = memory_store();
        store.remove("1").await.unwrap();
        let exported = store.export().unwrap();

        let (mut other, _) = memory_store();
        other.import(&exported).await.unwrap();
        assert_eq!(other.subscriptions(), store.subscriptions());
    }

    #[tokio::test]
    async fn test_import_rejects_corrupt_payload() {
        let (mut store, _) = memory_store();

        let err = store.import("{ not json").await.unwrap_err();
        assert!(matches!(err, SubtrackError::InvalidData(_)));

        let err = store.import("[1, 2, 3]").await.unwrap_err();
        assert!(matches!(err, SubtrackError::InvalidData(_)));

        // State untouched on failure
        assert_eq!(store.subscriptions(), default_subscriptions());
    }

    #[tokio::test]
    async fn test_load_hydrates_persisted_list() {
        let storage = Arc::new(MemoryStore::default());
        let list = vec![Subscription {
            id: "42".to_string(),
            name: "Figma".to_string(),
            price: 12.0,
            currency: "USD".to_string(),
            domain: "https://figma.com".to_string(),
            icon: None,
            billing_cycle: None,
            payment_day: None,
            next_payment_date: None,
            show_next_payment: None,
        }];
        storage
            .set_item(
                SUBSCRIPTION_STORAGE_KEY,
                &serde_json::to_string(&list).unwrap(),
            )
            .await;

        let mut store = SubscriptionStore::new(storage);
        store.load().await;
        assert_eq!(store.subscriptions(), list);
    }

    #[tokio::test]
    async fn test_load_falls_back_to_defaults() {
        // Absent record
        let (mut store, _) = memory_store();
        store.load().await;
        assert_eq!(store.subscriptions(), default_subscriptions());

        // Empty list
        let storage = Arc::new(MemoryStore::default());
        storage.set_item(SUBSCRIPTION_STORAGE_KEY, "[]").await;
        let mut store = SubscriptionStore::new(storage);
        store.load().await;
        assert_eq!(store.subscriptions(), default_subscriptions());

        // Corrupt payload
        let storage = Arc::new(MemoryStore::default());
        storage.set_item(SUBSCRIPTION_STORAGE_KEY, "{ nope").await;
        let mut store = SubscriptionStore::new(storage);
        store.load().await;
        assert_eq!(store.subscriptions(), default_subscriptions());
    }

    #[tokio::test]
    async fn test_load_rolls_lapsed_dates_forward() {
        let storage = Arc::new(MemoryStore::default());
        let mut list = default_subscriptions();
        list[0].billing_cycle = Some(BillingCycle::Weekly);
        list[0].next_payment_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        storage
            .set_item(
                SUBSCRIPTION_STORAGE_KEY,
                &serde_json::to_string(&list).unwrap(),
            )
            .await;

        let mut store = SubscriptionStore::new(storage);
        store.load().await;

        let next = store.subscriptions()[0].next_payment_date.unwrap();
        assert!(next > today());
    }

    #[tokio::test]
    async fn test_refresh_keeps_future_dates_and_persists_changes() {
        let (mut store, storage) = memory_store();
        let future = today() + chrono::Days::new(30);

        store
            .edit(
                "1",
                SubscriptionUpdate {
                    billing_cycle: Some(BillingCycle::Monthly),
                    next_payment_date: Some(future),
                    ..SubscriptionUpdate::default()
                },
            )
            .await
            .unwrap();

        store.refresh_payment_dates().await;
        assert_eq!(store.subscriptions()[0].next_payment_date, Some(future));
        assert_eq!(persisted_list(&storage)[0].next_payment_date, Some(future));
    }

    #[tokio::test]
    async fn test_reset_to_defaults() {
        let (mut store, storage) = memory_store();

        store
            .add(NewSubscription::new("Figma", 12.0, "USD", "https://figma.com"))
            .await;
        store.reset_to_defaults().await;

        assert_eq!(store.subscriptions(), default_subscriptions());
        assert_eq!(persisted_list(&storage), default_subscriptions());
    }

    #[tokio::test]
    async fn test_total_in_converts_across_currencies() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
        let mut store = SubscriptionStore::new(storage);
        store.import("[]").await.unwrap();

        store
            .add(NewSubscription::new("A", 10.0, "USD", "https://a.com"))
            .await;
        store
            .add(NewSubscription::new("B", 9.0, "EUR", "https://b.com"))
            .await;
        store
            .add(NewSubscription::new("C", 5.0, "XXX", "https://c.com"))
            .await;

        let rates = RateTable::new("USD", [("USD", 1.0), ("EUR", 0.9)]);

        // 10 USD + 9 EUR (= 10 USD); unknown XXX is skipped
        let total = store.total_in(&rates, "USD");
        assert!((total - 20.0).abs() < 1e-9);

        let total_eur = store.total_in(&rates, "EUR");
        assert!((total_eur - 18.0).abs() < 1e-9);
    }
}
