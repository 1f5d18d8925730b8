//! In-memory CPI table and its `PriceIndexProvider` impl.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use crate::domain::CountryCode;
use crate::value::PriceIndexProvider;

/// Yearly CPI values: country → (year → value). Every stored value is
/// positive; the loader drops anything else.
pub type CpiTable = HashMap<CountryCode, BTreeMap<i32, f64>>;

/// Immutable CPI store. Loaded once at startup, safe for unsynchronized
/// concurrent reads.
#[derive(Debug, Clone)]
pub struct CpiStore {
    by_country: CpiTable,
}

impl CpiStore {
    pub fn new(table: CpiTable) -> Self {
        Self { by_country: table }
    }

    /// The newest available CPI value for a country.
    pub fn latest(&self, country: &CountryCode) -> Option<f64> {
        let series = self.by_country.get(country)?;
        series.values().next_back().copied()
    }

    /// CPI value for one country and year.
    pub fn value(&self, country: &CountryCode, year: i32) -> Option<f64> {
        self.by_country.get(country)?.get(&year).copied()
    }

    /// Mean of the available yearly values in
    /// `[end_year − window_years + 1, end_year]`. Missing years are simply
    /// absent from the mean, not imputed.
    pub fn window_average_ending(
        &self,
        country: &CountryCode,
        window_years: u32,
        end_year: i32,
    ) -> Option<f64> {
        if window_years == 0 {
            return None;
        }
        let series = self.by_country.get(country)?;
        // i64 arithmetic: a caller-supplied width must not wrap the range
        let start_year = i64::from(end_year) - i64::from(window_years) + 1;
        let start_year = i32::try_from(start_year).unwrap_or(i32::MIN);

        let mut sum = 0.0;
        let mut count = 0u32;
        for value in series.range(start_year..=end_year).map(|(_, v)| *v) {
            sum += value;
            count += 1;
        }

        if count == 0 { None } else { Some(sum / f64::from(count)) }
    }

    /// Number of countries with any data.
    pub fn country_count(&self) -> usize {
        self.by_country.len()
    }
}

#[async_trait]
impl PriceIndexProvider for CpiStore {
    async fn latest(&self, country: &CountryCode) -> Option<f64> {
        CpiStore::latest(self, country)
    }

    async fn window_average(&self, country: &CountryCode, window_years: u32) -> Option<f64> {
        self.window_average_ending(country, window_years, last_complete_year())
    }
}

/// CPI data characteristically lags by one year, so windows end at the
/// last complete calendar year.
fn last_complete_year() -> i32 {
    Utc::now().year() - 1
}
