//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::directory::DirectoryEntry;
use crate::value::{RankedDestination, TravelValueResult};

/// Query parameters for the index endpoint.
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// Base (traveler's home) country code
    pub base: String,

    /// Target (destination) country code
    pub target: String,

    /// Historical window in years (defaults to the configured window)
    pub window_years: Option<u32>,
}

/// Query parameters for the ranking endpoint.
#[derive(Debug, Deserialize)]
pub struct RankQuery {
    /// Base (traveler's home) country code
    pub base: String,

    /// Historical window in years (defaults to the configured window)
    pub window_years: Option<u32>,
}

/// Service identity returned at the root.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

/// One directory entry.
#[derive(Debug, Serialize)]
pub struct CountryResult {
    pub country: String,
    pub currency: String,
    pub display_name: String,
}

impl From<&DirectoryEntry> for CountryResult {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            country: entry.country.as_str().to_string(),
            currency: entry.currency.as_str().to_string(),
            display_name: entry.display_name.clone(),
        }
    }
}

/// Supported currency codes.
#[derive(Debug, Serialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<String>,
}

/// Result of one index computation.
#[derive(Debug, Serialize)]
pub struct TravelValueResponse {
    pub base: String,
    pub target: String,
    pub real_rate_current: f64,
    pub real_rate_historical: f64,
    pub index: f64,
    pub percent_vs_historical: f64,
    pub interpretation: String,
}

impl From<TravelValueResult> for TravelValueResponse {
    fn from(result: TravelValueResult) -> Self {
        Self {
            base: result.base.as_str().to_string(),
            target: result.target.as_str().to_string(),
            real_rate_current: result.real_rate_current,
            real_rate_historical: result.real_rate_historical,
            index: result.index,
            percent_vs_historical: result.percent_vs_historical,
            interpretation: result.interpretation,
        }
    }
}

/// One ranked destination.
#[derive(Debug, Serialize)]
pub struct RankedDestinationResult {
    pub country: String,
    pub index: f64,
}

impl From<&RankedDestination> for RankedDestinationResult {
    fn from(ranked: &RankedDestination) -> Self {
        Self {
            country: ranked.country.as_str().to_string(),
            index: ranked.index,
        }
    }
}

/// Response for the ranking endpoint.
#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub base: String,
    pub window_years: u32,
    pub destinations: Vec<RankedDestinationResult>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
