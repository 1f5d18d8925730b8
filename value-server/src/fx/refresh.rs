//! Daily FX refresh from the Frankfurter API.
//!
//! `GET {base_url}/latest?base=EUR` returns the most recent EUR-base rates:
//!
//! ```text
//! {"base": "EUR", "date": "2026-01-30", "rates": {"USD": 1.1919, ...}}
//! ```
//!
//! A background task calls [`FxRefreshClient::refresh_into`] once a day; on
//! failure the existing table is preserved and the error is returned.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::domain::CurrencyCode;

use super::store::FxStore;

/// Default base URL for the Frankfurter API.
const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Configuration for the refresh client.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Base URL for the API (defaults to production Frankfurter).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl RefreshConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Errors from the refresh client.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("bad date {0:?} in API response")]
    BadDate(String),
}

/// Wire shape of the `/latest` response.
#[derive(Debug, Deserialize)]
struct LatestRatesDto {
    date: String,
    rates: HashMap<String, f64>,
}

/// HTTP client for the daily EUR rate refresh.
#[derive(Clone)]
pub struct FxRefreshClient {
    http: reqwest::Client,
    base_url: String,
}

impl FxRefreshClient {
    pub fn new(config: &RefreshConfig) -> Result<Self, RefreshError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch the latest EUR-base rates.
    pub async fn fetch_latest(
        &self,
    ) -> Result<(NaiveDate, HashMap<CurrencyCode, f64>), RefreshError> {
        let url = format!("{}/latest", self.base_url);
        let response = self.http.get(&url).query(&[("base", "EUR")]).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RefreshError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let dto: LatestRatesDto = response.json().await?;
        convert(dto)
    }

    /// Fetch the latest rates and insert them into the store. Returns the
    /// number of currencies stored.
    pub async fn refresh_into(&self, store: &FxStore) -> Result<usize, RefreshError> {
        let (date, rates) = self.fetch_latest().await?;
        Ok(store.insert_day(date, rates).await)
    }
}

/// Validate the wire response into a store row, dropping entries that
/// violate the rate invariant.
fn convert(dto: LatestRatesDto) -> Result<(NaiveDate, HashMap<CurrencyCode, f64>), RefreshError> {
    let date = NaiveDate::parse_from_str(&dto.date, "%Y-%m-%d")
        .map_err(|_| RefreshError::BadDate(dto.date.clone()))?;

    let mut rates = HashMap::with_capacity(dto.rates.len());
    for (code, rate) in dto.rates {
        let Ok(currency) = CurrencyCode::parse_normalized(&code) else {
            warn!(code, "unparsable currency in API response, skipping");
            continue;
        };
        if !(rate.is_finite() && rate > 0.0) {
            warn!(currency = %currency, rate, "dropping non-positive API rate");
            continue;
        }
        rates.insert(currency, rate);
    }

    Ok((date, rates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cur(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn convert_valid_response() {
        let dto: LatestRatesDto = serde_json::from_str(
            r#"{"base": "EUR", "date": "2026-01-30", "rates": {"USD": 1.1919, "JPY": 183.59}}"#,
        )
        .unwrap();

        let (date, rates) = convert(dto).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 30).unwrap());
        assert_eq!(rates[&cur("USD")], 1.1919);
        assert_eq!(rates[&cur("JPY")], 183.59);
    }

    #[test]
    fn convert_drops_bad_entries() {
        let dto: LatestRatesDto = serde_json::from_str(
            r#"{"date": "2026-01-30", "rates": {"USD": 1.19, "BAD1": 2.0, "JPY": -1.0}}"#,
        )
        .unwrap();

        let (_, rates) = convert(dto).unwrap();
        assert_eq!(rates.len(), 1);
        assert!(rates.contains_key(&cur("USD")));
    }

    #[test]
    fn convert_rejects_bad_date() {
        let dto: LatestRatesDto =
            serde_json::from_str(r#"{"date": "30/01/2026", "rates": {}}"#).unwrap();
        assert!(matches!(convert(dto), Err(RefreshError::BadDate(_))));
    }

    #[tokio::test]
    async fn refresh_inserts_into_store() {
        let store = FxStore::empty();
        let dto: LatestRatesDto =
            serde_json::from_str(r#"{"date": "2026-01-30", "rates": {"USD": 1.19}}"#).unwrap();
        let (date, rates) = convert(dto).unwrap();

        store.insert_day(date, rates).await;
        assert_eq!(store.latest_date().await, Some(date));
    }
}
