//! `RateProvider` over the EUR-base store.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use moka::future::Cache;

use crate::domain::CurrencyCode;
use crate::value::RateProvider;

use super::store::{FxStore, FxTable};

/// Cache key for a window average: (base, target, window, end year).
type WindowKey = (CurrencyCode, CurrencyCode, u32, i32);

/// Window averages scan every daily rate in the window, and the underlying
/// years are immutable once complete, so the results are cached. The TTL
/// only matters for re-running after a historical backfill.
const WINDOW_CACHE_TTL_SECS: u64 = 6 * 60 * 60;
const WINDOW_CACHE_CAPACITY: u64 = 4096;

/// Exchange-rate provider with EUR-pivot conversion.
pub struct FxProvider {
    store: FxStore,
    window_cache: Cache<WindowKey, Option<f64>>,
}

impl FxProvider {
    pub fn new(store: FxStore) -> Self {
        let window_cache = Cache::builder()
            .time_to_live(std::time::Duration::from_secs(WINDOW_CACHE_TTL_SECS))
            .max_capacity(WINDOW_CACHE_CAPACITY)
            .build();

        Self {
            store,
            window_cache,
        }
    }

    /// Window average with an explicit end year (for deterministic tests;
    /// the trait method uses the last complete calendar year).
    pub async fn window_average_ending(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        window_years: u32,
        end_year: i32,
    ) -> Option<f64> {
        let key = (*base, *target, window_years, end_year);
        if let Some(cached) = self.window_cache.get(&key).await {
            return cached;
        }

        let average = {
            let table = self.store.read().await;
            window_average(&table, base, target, window_years, end_year)
        };

        self.window_cache.insert(key, average).await;
        average
    }
}

#[async_trait]
impl RateProvider for FxProvider {
    async fn latest(&self, base: &CurrencyCode, target: &CurrencyCode) -> Option<f64> {
        let table = self.store.read().await;
        let date = *table.keys().next_back()?;
        cross_rate(&table, &date, base, target)
    }

    async fn window_average(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        window_years: u32,
    ) -> Option<f64> {
        self.window_average_ending(base, target, window_years, last_complete_year())
            .await
    }

    async fn supported_currencies(&self) -> HashSet<CurrencyCode> {
        let table = self.store.read().await;
        let Some(date) = table.keys().next_back() else {
            return HashSet::new();
        };

        let mut currencies: HashSet<CurrencyCode> = table[date].keys().copied().collect();
        // The pivot itself is never a column in EUR-base data
        currencies.insert(CurrencyCode::EUR);
        currencies
    }
}

/// FX data lags the calendar: averages end at the last complete year.
fn last_complete_year() -> i32 {
    Utc::now().year() - 1
}

/// Rate from `base` to `target` on one date, converting through EUR:
/// EUR→X is a direct lookup, X→EUR is 1/(EUR→X), and X→Y is
/// (1/(EUR→X)) × (EUR→Y). `rate(X, X) = 1.0` is synthesized, never stored.
fn cross_rate(
    table: &FxTable,
    date: &NaiveDate,
    base: &CurrencyCode,
    target: &CurrencyCode,
) -> Option<f64> {
    if base == target {
        return Some(1.0);
    }

    let day = table.get(date)?;

    if *base == CurrencyCode::EUR {
        return day.get(target).copied();
    }

    if *target == CurrencyCode::EUR {
        return day.get(base).map(|eur_to_base| 1.0 / eur_to_base);
    }

    let eur_to_base = day.get(base)?;
    let eur_to_target = day.get(target)?;
    Some((1.0 / eur_to_base) * eur_to_target)
}

/// Mean of the convertible daily rates within one calendar year.
fn year_average(
    table: &FxTable,
    base: &CurrencyCode,
    target: &CurrencyCode,
    year: i32,
) -> Option<f64> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;

    let mut sum = 0.0;
    let mut count = 0u32;
    for (date, _) in table.range(start..=end) {
        if let Some(rate) = cross_rate(table, date, base, target) {
            sum += rate;
            count += 1;
        }
    }

    if count == 0 { None } else { Some(sum / f64::from(count)) }
}

/// Mean of yearly averages over `[end_year − window + 1, end_year]`.
/// Years with zero observations are excluded from the outer mean rather
/// than contributing a zero.
fn window_average(
    table: &FxTable,
    base: &CurrencyCode,
    target: &CurrencyCode,
    window_years: u32,
    end_year: i32,
) -> Option<f64> {
    if window_years == 0 {
        return None;
    }
    // i64 arithmetic: a caller-supplied width must not wrap the range.
    // Years before the first observation are empty anyway, so the scan
    // starts no earlier than the table does.
    let first_year = table.keys().next()?.year();
    let start_year = i64::from(end_year) - i64::from(window_years) + 1;
    let start_year = i32::try_from(start_year)
        .unwrap_or(first_year)
        .max(first_year);

    let mut sum = 0.0;
    let mut count = 0u32;
    for year in start_year..=end_year {
        if let Some(average) = year_average(table, base, target, year) {
            sum += average;
            count += 1;
        }
    }

    if count == 0 { None } else { Some(sum / f64::from(count)) }
}
