//! Travel value index for one base/target country pair.

use crate::domain::{CountryCode, ValueError};

use super::real_rate::RealRateCalculator;

/// Result of one index computation. Ephemeral, computed per request.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelValueResult {
    pub base: CountryCode,
    pub target: CountryCode,
    /// Real exchange rate right now.
    pub real_rate_current: f64,
    /// Real exchange rate averaged over the historical window.
    pub real_rate_historical: f64,
    /// `real_rate_current / real_rate_historical`. Above 1.0 the destination
    /// is currently cheaper than its historical norm for the traveler.
    pub index: f64,
    /// `(index − 1) × 100`.
    pub percent_vs_historical: f64,
    /// Human-readable reading of the index.
    pub interpretation: String,
}

/// Composes current and historical real rates into a travel value index.
///
/// Propagates every calculator error unchanged; the caller decides how to
/// surface them.
#[derive(Clone)]
pub struct TravelValueIndexer {
    calculator: RealRateCalculator,
}

impl TravelValueIndexer {
    pub fn new(calculator: RealRateCalculator) -> Self {
        Self { calculator }
    }

    /// Compute the travel value index for `base` → `target` against a
    /// `window_years` historical window.
    pub async fn index(
        &self,
        base: &CountryCode,
        target: &CountryCode,
        window_years: u32,
    ) -> Result<TravelValueResult, ValueError> {
        let real_rate_current = self.calculator.current(base, target).await?;
        let real_rate_historical = self.calculator.historical(base, target, window_years).await?;

        let index = real_rate_current / real_rate_historical;
        let percent_vs_historical = (index - 1.0) * 100.0;

        Ok(TravelValueResult {
            base: *base,
            target: *target,
            real_rate_current,
            real_rate_historical,
            index,
            percent_vs_historical,
            interpretation: interpret(percent_vs_historical),
        })
    }
}

/// A positive percentage means the target currency is currently weaker in
/// real terms than its historical norm, which favors the traveler.
fn interpret(percent_vs_historical: f64) -> String {
    let reading = if percent_vs_historical > 0.0 {
        "Better"
    } else {
        "Worse"
    };
    format!(
        "{reading} value than the historical norm ({:.1}%)",
        percent_vs_historical.abs()
    )
}
