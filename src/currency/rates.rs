use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exchange rates relative to a base currency.
///
/// Every rate is units of that currency per one unit of the base. The base
/// itself always resolves to 1.0 whether or not it appears in the map.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new<I, K>(base: impl Into<String>, rates: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            base: base.into(),
            rates: rates.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Rate for `currency` against the base, if known.
    #[must_use]
    pub fn rate(&self, currency: &str) -> Option<f64> {
        if currency == self.base {
            return Some(1.0);
        }
        self.rates.get(currency).copied()
    }

    /// Convert `amount` from one currency to another through the base.
    ///
    /// Returns `None` when either currency is missing from the table.
    #[must_use]
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Some(amount / from_rate * to_rate)
    }

    /// Currencies this table can convert between, base included.
    #[must_use]
    pub fn currencies(&self) -> Vec<String> {
        let mut out: Vec<String> = self.rates.keys().cloned().collect();
        if !self.rates.contains_key(&self.base) {
            out.push(self.base.clone());
        }
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::new("USD", [("EUR", 0.9), ("GBP", 0.8), ("JPY", 150.0)])
    }

    #[test]
    fn test_base_rate_is_one() {
        assert_eq!(table().rate("USD"), Some(1.0));
    }

    #[test]
    fn test_unknown_currency_has_no_rate() {
        assert_eq!(table().rate("XXX"), None);
    }

    #[test]
    fn test_convert_from_base() {
        let converted = table().convert(10.0, "USD", "EUR").unwrap();
        assert!((converted - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_to_base() {
        let converted = table().convert(9.0, "EUR", "USD").unwrap();
        assert!((converted - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_cross_rate() {
        // 9 EUR -> 10 USD -> 8 GBP
        let converted = table().convert(9.0, "EUR", "GBP").unwrap();
        assert!((converted - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_with_unknown_currency_is_none() {
        assert_eq!(table().convert(1.0, "XXX", "USD"), None);
        assert_eq!(table().convert(1.0, "USD", "XXX"), None);
    }

    #[test]
    fn test_currencies_include_base_once() {
        let currencies = table().currencies();
        assert_eq!(currencies, vec!["EUR", "GBP", "JPY", "USD"]);
    }
}
