//! Rate fetching and caching.

use super::config::CurrencyConfig;
use super::rates::RateTable;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Source of the latest exchange rates.
///
/// The production implementation is [`FrankfurterClient`]; tests inject a
/// mock so caching behavior can be exercised without the network.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn latest(&self) -> Result<RateTable>;
}

/// Wire shape of the Frankfurter `latest` endpoint.
#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    base: String,
    rates: HashMap<String, f64>,
}

/// Reqwest-based [`RateProvider`] against a Frankfurter-compatible API.
pub struct FrankfurterClient {
    client: reqwest::Client,
    api_url: String,
    base: String,
    symbols: Option<String>,
}

impl FrankfurterClient {
    pub fn new(config: &CurrencyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let symbols = if config.symbols.is_empty() {
            None
        } else {
            Some(config.symbols.join(","))
        };

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            base: config.base.clone(),
            symbols,
        })
    }
}

#[async_trait]
impl RateProvider for FrankfurterClient {
    async fn latest(&self) -> Result<RateTable> {
        let mut request = self.client.get(&self.api_url).query(&[("base", &self.base)]);
        if let Some(symbols) = &self.symbols {
            request = request.query(&[("symbols", symbols)]);
        }
        let response = request.send().await?.error_for_status()?;

        let body: FrankfurterResponse = response.json().await?;

        // The API omits the base from its own rate map; pin it so the table
        // is self-contained.
        let mut rates = body.rates;
        rates.insert(body.base.clone(), 1.0);

        Ok(RateTable {
            base: body.base,
            rates,
        })
    }
}

struct CacheSlot {
    table: RateTable,
    fetched_at: Instant,
}

/// TTL-bound single-slot cache over a [`RateProvider`].
///
/// Rates move once a day; a fresh slot is served without touching the
/// upstream. When a refresh fails and a stale slot exists, the stale table is
/// served instead of the error, so conversion keeps working through upstream
/// outages.
pub struct CachedRates<P: RateProvider> {
    provider: P,
    ttl: Duration,
    slot: RwLock<Option<CacheSlot>>,
}

impl<P: RateProvider> CachedRates<P> {
    pub fn new(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Current rate table, fetching if the cached one is missing or expired.
    ///
    /// `force` bypasses the freshness check but still falls back to the stale
    /// slot when the fetch fails. Errors surface only when no table has ever
    /// been fetched.
    pub async fn get(&self, force: bool) -> Result<RateTable> {
        if !force {
            let slot = self.slot.read().await;
            if let Some(slot) = slot.as_ref() {
                if slot.fetched_at.elapsed() < self.ttl {
                    return Ok(slot.table.clone());
                }
            }
        }

        match self.provider.latest().await {
            Ok(table) => {
                let mut slot = self.slot.write().await;
                *slot = Some(CacheSlot {
                    table: table.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(table)
            }
            Err(err) => {
                let slot = self.slot.read().await;
                match slot.as_ref() {
                    Some(slot) => {
                        tracing::warn!(error = %err, "rate refresh failed, serving stale rates");
                        Ok(slot.table.clone())
                    }
                    None => Err(err),
                }
            }
        }
    }
}
