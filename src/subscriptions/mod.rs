//! Subscription records and the store that owns them.
//!
//! The store keeps an immutable in-memory snapshot of the subscription list
//! and persists it through an injected [`KeyValueStore`](crate::KeyValueStore)
//! after every mutation. First-run state comes from a built-in default list.

mod defaults;
mod model;
mod store;

pub use defaults::default_subscriptions;
pub use model::{BillingCycle, NewSubscription, Subscription, SubscriptionUpdate};
pub use store::SubscriptionStore;

/// Well-known persistence key for the serialized subscription list.
pub const SUBSCRIPTION_STORAGE_KEY: &str = "subscription-storage";
