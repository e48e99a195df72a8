//! Subtrack - the domain core of a recurring-subscription tracker
//!
//! Subtrack owns the logic a subscription-tracking UI sits on top of:
//! billing-cycle-aware next-payment-date arithmetic, a pluggable key-value
//! persistence layer, a subscription store with built-in first-run defaults,
//! and a cached currency-rate service for cross-currency totals.
//!
//! # Features
//!
//! - **Scheduling**: pure next-payment-date computation with month-end clamping
//! - **Persistence**: swappable no-op / file-backed / remote-HTTP key-value stores
//! - **Subscriptions**: snapshot-based store with import/export and defaults
//! - **Currency**: rate table conversion with a TTL cache and stale fallback
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use subtrack::{storage, Config, SubscriptionStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     subtrack::init_tracing();
//!
//!     let config = Config::from_env();
//!     let kv: Arc<dyn subtrack::KeyValueStore> = storage::from_config(&config.storage);
//!
//!     let mut store = SubscriptionStore::new(kv);
//!     store.load().await;
//! }
//! ```

mod config;
pub mod currency;
mod error;
pub mod schedule;
pub mod storage;
pub mod subscriptions;
pub mod traits;
pub mod utils;

// Re-exports for public API
pub use config::{Config, ConfigBuilder, LoggingConfig};
pub use currency::{CachedRates, CurrencyConfig, FrankfurterClient, RateProvider, RateTable};
pub use error::{Result, SubtrackError};
pub use schedule::{calculate_next_payment_date, initialize_next_payment_date};
pub use storage::{
    HttpStorageApi, LocalStore, NoOpStore, RemoteStore, StorageBackend, StorageConfig,
};
pub use subscriptions::{
    BillingCycle, NewSubscription, Subscription, SubscriptionStore, SubscriptionUpdate,
    SUBSCRIPTION_STORAGE_KEY,
};
pub use traits::storage::{KeyValueStore, StorageApi};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, typically in main().
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "subtrack=debug")
/// - `SUBTRACK_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("SUBTRACK_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Initialize tracing with a custom configuration
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::new(&config.logging.level);

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
