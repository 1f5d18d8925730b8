//! Provider traits consumed by the engine.
//!
//! These abstractions allow the engine to be tested with mock data and keep
//! the backing store (local cache, upstream API) out of the core. Providers
//! signal absence with `None`; absence is a normal condition, not a fault.
//! Providers are assumed safe for concurrent invocation.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{CountryCode, CurrencyCode};

/// Source of exchange-rate observations.
///
/// Rates are always "1 unit of base = rate units of target", and
/// `rate(X, X) = 1.0` by definition for any currency X.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Most recent rate from `base` to `target`, if any.
    async fn latest(&self, base: &CurrencyCode, target: &CurrencyCode) -> Option<f64>;

    /// Mean rate over the trailing `window_years` years ending at the last
    /// complete year: daily rates are averaged within each calendar year,
    /// then the yearly means are averaged. Years with no observations do
    /// not contribute; `None` if every year in the window is empty.
    async fn window_average(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        window_years: u32,
    ) -> Option<f64>;

    /// Currencies this provider has observations for.
    async fn supported_currencies(&self) -> HashSet<CurrencyCode>;
}

/// Source of consumer-price-index observations.
///
/// CPI values are per-country, per-year scalars on an arbitrary base-year
/// scale; only ratios between comparably-scaled values are meaningful.
#[async_trait]
pub trait PriceIndexProvider: Send + Sync {
    /// Most recent CPI value for `country`, if any.
    async fn latest(&self, country: &CountryCode) -> Option<f64>;

    /// Mean of available yearly values over the trailing `window_years`
    /// years ending at the last complete year; missing years are simply
    /// absent from the mean. `None` if no year in the window has a value.
    async fn window_average(&self, country: &CountryCode, window_years: u32) -> Option<f64>;
}
