//! Error taxonomy for the travel value engine.
//!
//! These kinds are the engine's whole error contract: every failure surfaces
//! as a distinguishable variant, never as an ambiguous zero or NaN disguised
//! as success. The HTTP boundary decides how each kind maps to a status code.

use super::{CountryCode, CurrencyCode};

/// Failures produced by the real-rate, index and ranking computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// A country code has no currency mapping. Caller input error.
    #[error("no currency mapping for country {0}")]
    InvalidCountry(CountryCode),

    /// No FX observation available for the requested pair/period.
    #[error("no exchange rate available for {base}/{target}")]
    MissingRateData {
        base: CurrencyCode,
        target: CurrencyCode,
    },

    /// No CPI observation available for the requested country/period.
    #[error("no price index available for {0}")]
    MissingPriceData(CountryCode),

    /// Window averaging found zero usable years of data.
    #[error("no usable history for {base}/{target} in a {window_years}-year window")]
    InsufficientHistory {
        base: CountryCode,
        target: CountryCode,
        window_years: u32,
    },

    /// An upstream value violates an invariant (e.g. non-positive CPI).
    #[error("upstream data integrity fault: {0}")]
    DataIntegrityFault(String),
}
