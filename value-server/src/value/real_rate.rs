//! Real exchange rate computation.
//!
//! A real rate is a raw FX rate corrected for relative inflation between
//! the two economies: `fx × (cpi_base / cpi_target)`. Raw FX alone would
//! make a country look artificially cheap purely because of long-run
//! inflation differentials; the CPI ratio cancels that drift.

use std::sync::Arc;

use crate::directory::CurrencyDirectory;
use crate::domain::{CountryCode, CurrencyCode, ValueError};

use super::provider::{PriceIndexProvider, RateProvider};

/// Derives current and historical real exchange rates for country pairs.
///
/// Every failure propagates to the caller; there is no catch-and-continue
/// at this level.
#[derive(Clone)]
pub struct RealRateCalculator {
    directory: Arc<CurrencyDirectory>,
    rates: Arc<dyn RateProvider>,
    prices: Arc<dyn PriceIndexProvider>,
}

impl RealRateCalculator {
    pub fn new(
        directory: Arc<CurrencyDirectory>,
        rates: Arc<dyn RateProvider>,
        prices: Arc<dyn PriceIndexProvider>,
    ) -> Self {
        Self {
            directory,
            rates,
            prices,
        }
    }

    /// Resolve a country's currency, or fail with `InvalidCountry`.
    pub fn resolve_currency(&self, country: &CountryCode) -> Result<CurrencyCode, ValueError> {
        self.directory
            .country_to_currency(country)
            .ok_or(ValueError::InvalidCountry(*country))
    }

    /// Real exchange rate from `base` to `target` using the latest FX rate
    /// and the latest CPI value for each country.
    pub async fn current(
        &self,
        base: &CountryCode,
        target: &CountryCode,
    ) -> Result<f64, ValueError> {
        let base_currency = self.resolve_currency(base)?;
        let target_currency = self.resolve_currency(target)?;

        // rate(X, X) = 1 and cpi_x / cpi_x = 1: no provider calls needed
        if base == target {
            return Ok(1.0);
        }

        let fx = self
            .rates
            .latest(&base_currency, &target_currency)
            .await
            .ok_or(ValueError::MissingRateData {
                base: base_currency,
                target: target_currency,
            })?;
        check_rate(fx, &base_currency, &target_currency)?;

        let cpi_base = self
            .prices
            .latest(base)
            .await
            .ok_or(ValueError::MissingPriceData(*base))?;
        let cpi_target = self
            .prices
            .latest(target)
            .await
            .ok_or(ValueError::MissingPriceData(*target))?;

        Ok(fx * (check_cpi(cpi_base, base)? / check_cpi(cpi_target, target)?))
    }

    /// Real exchange rate from `base` to `target` averaged over the trailing
    /// `window_years` years ending at the last complete year (price index
    /// data characteristically lags by one year).
    pub async fn historical(
        &self,
        base: &CountryCode,
        target: &CountryCode,
        window_years: u32,
    ) -> Result<f64, ValueError> {
        let base_currency = self.resolve_currency(base)?;
        let target_currency = self.resolve_currency(target)?;

        if base == target {
            return Ok(1.0);
        }

        let insufficient = || ValueError::InsufficientHistory {
            base: *base,
            target: *target,
            window_years,
        };

        let fx = self
            .rates
            .window_average(&base_currency, &target_currency, window_years)
            .await
            .ok_or_else(insufficient)?;
        check_rate(fx, &base_currency, &target_currency)?;

        let cpi_base = self
            .prices
            .window_average(base, window_years)
            .await
            .ok_or_else(insufficient)?;
        let cpi_target = self
            .prices
            .window_average(target, window_years)
            .await
            .ok_or_else(insufficient)?;

        Ok(fx * (check_cpi(cpi_base, base)? / check_cpi(cpi_target, target)?))
    }
}

/// Upstream guarantees CPI > 0; anything else is a data integrity fault,
/// never coerced into Infinity/NaN.
fn check_cpi(value: f64, country: &CountryCode) -> Result<f64, ValueError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValueError::DataIntegrityFault(format!(
            "CPI for {country} is not positive ({value})"
        )))
    }
}

/// FX observations are positive by invariant.
fn check_rate(rate: f64, base: &CurrencyCode, target: &CurrencyCode) -> Result<f64, ValueError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(ValueError::DataIntegrityFault(format!(
            "FX rate {base}/{target} is not positive ({rate})"
        )))
    }
}
