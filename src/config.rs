//! Application configuration.
//!
//! Composed from per-module sections, each loadable from `SUBTRACK_`-prefixed
//! environment variables (the unprefixed name works as a fallback) or built
//! programmatically through [`ConfigBuilder`].

use crate::currency::CurrencyConfig;
use crate::storage::StorageConfig;
use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. "info", "subtrack=debug")
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = get_env_with_prefix("LOG_LEVEL") {
            config.level = level;
        }

        if let Some(json) = get_env_with_prefix("LOG_JSON") {
            config.json = json.parse().unwrap_or(false);
        }

        config
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            storage: StorageConfig::from_env(),
            currency: CurrencyConfig::from_env(),
            logging: LoggingConfig::from_env(),
        }
    }

    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for assembling a [`Config`] in code
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    storage: Option<StorageConfig>,
    currency: Option<CurrencyConfig>,
    logging: Option<LoggingConfig>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: CurrencyConfig) -> Self {
        self.currency = Some(currency);
        self
    }

    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        Config {
            storage: self.storage.unwrap_or_default(),
            currency: self.currency.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_builder_overrides_sections() {
        let config = Config::builder()
            .storage(StorageConfig {
                backend: StorageBackend::None,
                ..StorageConfig::default()
            })
            .logging(LoggingConfig {
                level: "debug".to_string(),
                json: true,
            })
            .build();

        assert_eq!(config.storage.backend, StorageBackend::None);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        // Untouched sections keep their defaults
        assert_eq!(config.currency.base, "USD");
    }

    #[test]
    fn test_config_deserializes_from_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"logging": {"level": "warn"}}"#).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.storage.backend, StorageBackend::Local);
    }
}
