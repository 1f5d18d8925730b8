//! Mock providers for testing the engine without real FX/CPI data.
//!
//! Fixed in-memory tables stand in for the provider collaborators. Like the
//! real FX provider, `MockRates` synthesizes `rate(X, X) = 1.0` and answers
//! reverse lookups with the inverse of a stored rate, so symmetric test
//! fixtures only need one direction per pair.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::domain::{CountryCode, CurrencyCode};

use super::provider::{PriceIndexProvider, RateProvider};

type Pair = (CurrencyCode, CurrencyCode);

/// Rate provider backed by fixed tables.
#[derive(Debug, Clone, Default)]
pub struct MockRates {
    latest: HashMap<Pair, f64>,
    averages: HashMap<Pair, f64>,
    supported: HashSet<CurrencyCode>,
}

impl MockRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a latest rate for `base` → `target`. Both currencies become
    /// supported.
    pub fn with_latest(mut self, base: CurrencyCode, target: CurrencyCode, rate: f64) -> Self {
        self.latest.insert((base, target), rate);
        self.supported.insert(base);
        self.supported.insert(target);
        self
    }

    /// Record a window-average rate for `base` → `target`.
    pub fn with_average(mut self, base: CurrencyCode, target: CurrencyCode, rate: f64) -> Self {
        self.averages.insert((base, target), rate);
        self.supported.insert(base);
        self.supported.insert(target);
        self
    }

    /// Mark a currency supported without recording any rates for it.
    pub fn with_supported(mut self, currency: CurrencyCode) -> Self {
        self.supported.insert(currency);
        self
    }

    fn lookup(table: &HashMap<Pair, f64>, base: &CurrencyCode, target: &CurrencyCode) -> Option<f64> {
        if base == target {
            return Some(1.0);
        }
        if let Some(rate) = table.get(&(*base, *target)) {
            return Some(*rate);
        }
        table.get(&(*target, *base)).map(|rate| 1.0 / rate)
    }
}

#[async_trait]
impl RateProvider for MockRates {
    async fn latest(&self, base: &CurrencyCode, target: &CurrencyCode) -> Option<f64> {
        Self::lookup(&self.latest, base, target)
    }

    async fn window_average(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        _window_years: u32,
    ) -> Option<f64> {
        Self::lookup(&self.averages, base, target)
    }

    async fn supported_currencies(&self) -> HashSet<CurrencyCode> {
        self.supported.clone()
    }
}

/// Price index provider backed by fixed tables.
#[derive(Debug, Clone, Default)]
pub struct MockPrices {
    latest: HashMap<CountryCode, f64>,
    averages: HashMap<CountryCode, f64>,
}

impl MockPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest CPI value for a country.
    pub fn with_latest(mut self, country: CountryCode, value: f64) -> Self {
        self.latest.insert(country, value);
        self
    }

    /// Record the window-average CPI value for a country.
    pub fn with_average(mut self, country: CountryCode, value: f64) -> Self {
        self.averages.insert(country, value);
        self
    }
}

#[async_trait]
impl PriceIndexProvider for MockPrices {
    async fn latest(&self, country: &CountryCode) -> Option<f64> {
        self.latest.get(country).copied()
    }

    async fn window_average(&self, country: &CountryCode, _window_years: u32) -> Option<f64> {
        self.averages.get(country).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cur(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn same_currency_is_unity() {
        let rates = MockRates::new();
        assert_eq!(rates.latest(&cur("AUD"), &cur("AUD")).await, Some(1.0));
    }

    #[tokio::test]
    async fn reverse_lookup_inverts() {
        let rates = MockRates::new().with_latest(cur("AUD"), cur("JPY"), 100.0);
        assert_eq!(rates.latest(&cur("AUD"), &cur("JPY")).await, Some(100.0));
        assert_eq!(rates.latest(&cur("JPY"), &cur("AUD")).await, Some(0.01));
    }

    #[tokio::test]
    async fn recorded_currencies_are_supported() {
        let rates = MockRates::new()
            .with_latest(cur("AUD"), cur("JPY"), 100.0)
            .with_supported(cur("NZD"));
        let supported = rates.supported_currencies().await;
        assert!(supported.contains(&cur("AUD")));
        assert!(supported.contains(&cur("JPY")));
        assert!(supported.contains(&cur("NZD")));
        assert!(!supported.contains(&cur("GBP")));
    }
}
