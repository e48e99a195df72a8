//! Exchange-rate lookup and conversion.
//!
//! [`FrankfurterClient`] fetches daily reference rates, [`CachedRates`] keeps
//! a TTL-bound copy and serves stale data when the upstream is unreachable,
//! and [`RateTable`] does the arithmetic.

mod config;
mod rates;
mod service;

pub use config::CurrencyConfig;
pub use rates::RateTable;
pub use service::{CachedRates, FrankfurterClient, RateProvider};
