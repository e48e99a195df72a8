use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};

/// Currency / exchange-rate configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrencyConfig {
    /// Rates endpoint (Frankfurter-compatible `latest` API)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base currency rates are quoted against
    #[serde(default = "default_base")]
    pub base: String,

    /// Currencies to fetch rates for; empty means all the API offers
    #[serde(default)]
    pub symbols: Vec<String>,

    /// How long a fetched rate table stays fresh, in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Request timeout, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            base: default_base(),
            symbols: Vec::new(),
            ttl_seconds: default_ttl_seconds(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl CurrencyConfig {
    /// Load currency configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = get_env_with_prefix("CURRENCY_API_URL") {
            config.api_url = url;
        }

        if let Some(base) = get_env_with_prefix("CURRENCY_BASE") {
            config.base = base.to_uppercase();
        }

        if let Some(symbols) = get_env_with_prefix("CURRENCY_SYMBOLS") {
            config.symbols = symbols
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ttl) = get_env_with_prefix("CURRENCY_TTL_SECONDS") {
            if let Ok(seconds) = ttl.parse() {
                config.ttl_seconds = seconds;
            }
        }

        if let Some(timeout) = get_env_with_prefix("CURRENCY_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse() {
                config.timeout_seconds = seconds;
            }
        }

        config
    }
}

fn default_api_url() -> String {
    "https://api.frankfurter.dev/v1/latest".to_string()
}

fn default_base() -> String {
    "USD".to_string()
}

fn default_ttl_seconds() -> u64 {
    6 * 60 * 60
}

fn default_timeout_seconds() -> u64 {
    10
}
