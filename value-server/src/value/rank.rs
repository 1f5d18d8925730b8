//! Destination ranking.
//!
//! Fans the indexer out over a candidate country list, skipping candidates
//! that cannot be evaluated, and sorts the survivors best-value-first. The
//! batch's value comes from coverage, so one bad country never blocks the
//! ranking of the rest: this is the one place where per-candidate failures
//! are caught and converted to "skip".

use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::directory::CurrencyDirectory;
use crate::domain::{CountryCode, ValueError};

use super::config::ValueConfig;
use super::index::TravelValueIndexer;
use super::provider::RateProvider;

/// One destination that passed all validity filters.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDestination {
    pub country: CountryCode,
    pub index: f64,
}

/// Ranks candidate destinations against a base country.
#[derive(Clone)]
pub struct DestinationRanker {
    indexer: TravelValueIndexer,
    directory: Arc<CurrencyDirectory>,
    rates: Arc<dyn RateProvider>,
    config: ValueConfig,
}

impl DestinationRanker {
    pub fn new(
        indexer: TravelValueIndexer,
        directory: Arc<CurrencyDirectory>,
        rates: Arc<dyn RateProvider>,
        config: ValueConfig,
    ) -> Self {
        Self {
            indexer,
            directory,
            rates,
            config,
        }
    }

    /// Rank `candidates` by travel value index for a traveler from `base`,
    /// descending (highest index first, ties in candidate-list order).
    ///
    /// Candidates equal to `base`, with no currency mapping, or with a
    /// currency the rate provider does not support are skipped up front;
    /// candidates whose index computation fails are skipped with a log
    /// line. An empty result is a valid outcome, not an error. Only an
    /// unmapped `base` fails the whole call.
    ///
    /// Candidates are evaluated in batches of `config.batch_width`
    /// independent units of work; all units settle before the final sort.
    pub async fn rank(
        &self,
        base: &CountryCode,
        window_years: Option<u32>,
        candidates: &[CountryCode],
    ) -> Result<Vec<RankedDestination>, ValueError> {
        let window = window_years.unwrap_or(self.config.window_years);

        if self.directory.country_to_currency(base).is_none() {
            return Err(ValueError::InvalidCountry(*base));
        }

        let supported = self.rates.supported_currencies().await;

        let eligible: Vec<CountryCode> = candidates
            .iter()
            .filter(|candidate| {
                if *candidate == base {
                    return false;
                }
                match self.directory.country_to_currency(candidate) {
                    Some(currency) if supported.contains(&currency) => true,
                    Some(currency) => {
                        debug!(country = %candidate, currency = %currency, "currency unsupported, skipping");
                        false
                    }
                    None => {
                        debug!(country = %candidate, "no currency mapping, skipping");
                        false
                    }
                }
            })
            .copied()
            .collect();

        let mut ranked = Vec::with_capacity(eligible.len());

        for batch in eligible.chunks(self.config.batch_width.max(1)) {
            let futures: Vec<_> = batch
                .iter()
                .map(|candidate| async move {
                    (*candidate, self.indexer.index(base, candidate, window).await)
                })
                .collect();

            for (candidate, result) in join_all(futures).await {
                match result {
                    Ok(value) => ranked.push(RankedDestination {
                        country: candidate,
                        index: value.index,
                    }),
                    Err(e) => {
                        debug!(country = %candidate, error = %e, "index computation failed, skipping");
                    }
                }
            }
        }

        // Stable sort: ties keep candidate-list order
        ranked.sort_by(|a, b| b.index.partial_cmp(&a.index).unwrap_or(Ordering::Equal));

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyCode;
    use crate::value::mock::{MockPrices, MockRates};
    use crate::value::RealRateCalculator;

    fn country(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    fn cur(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn directory() -> Arc<CurrencyDirectory> {
        let json = r#"[
            {"countryCode": "AUS", "currencyCode": "AUD", "displayName": "Australia"},
            {"countryCode": "JPN", "currencyCode": "JPY", "displayName": "Japan"},
            {"countryCode": "USA", "currencyCode": "USD", "displayName": "United States"},
            {"countryCode": "GBR", "currencyCode": "GBP", "displayName": "United Kingdom"},
            {"countryCode": "CAN", "currencyCode": "CAD", "displayName": "Canada"},
            {"countryCode": "NZL", "currencyCode": "NZD", "displayName": "New Zealand"}
        ]"#;
        Arc::new(CurrencyDirectory::from_json_str(json).unwrap())
    }

    /// Fixture with flat CPI everywhere (except GBR, which has none, so its
    /// index computation fails):
    /// - JPN index 1.2 (latest 120 vs 100 average)
    /// - CAN index 1.2 (tie with JPN)
    /// - USA index 0.8
    /// - NZL has a currency mapping but NZD is not supported
    fn ranker(batch_width: usize) -> DestinationRanker {
        let rates = MockRates::new()
            .with_latest(cur("AUD"), cur("JPY"), 120.0)
            .with_average(cur("AUD"), cur("JPY"), 100.0)
            .with_latest(cur("AUD"), cur("CAD"), 1.2)
            .with_average(cur("AUD"), cur("CAD"), 1.0)
            .with_latest(cur("AUD"), cur("USD"), 0.8)
            .with_average(cur("AUD"), cur("USD"), 1.0)
            .with_latest(cur("AUD"), cur("GBP"), 0.5)
            .with_average(cur("AUD"), cur("GBP"), 0.5);

        let mut prices = MockPrices::new();
        for code in ["AUS", "JPN", "USA", "CAN", "NZL"] {
            prices = prices
                .with_latest(country(code), 100.0)
                .with_average(country(code), 100.0);
        }

        let rates: Arc<dyn RateProvider> = Arc::new(rates);
        let indexer = TravelValueIndexer::new(RealRateCalculator::new(
            directory(),
            Arc::clone(&rates),
            Arc::new(prices),
        ));
        DestinationRanker::new(
            indexer,
            directory(),
            rates,
            ValueConfig::new(20, batch_width),
        )
    }

    #[tokio::test]
    async fn no_candidates_is_empty_not_error() {
        let ranked = ranker(20).rank(&country("AUS"), None, &[]).await.unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn base_is_excluded_from_its_own_ranking() {
        let ranked = ranker(20)
            .rank(&country("AUS"), None, &[country("AUS")])
            .await
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn unmapped_base_is_an_error() {
        let err = ranker(20)
            .rank(&country("ZZZ"), None, &[country("JPN")])
            .await
            .unwrap_err();
        assert_eq!(err, ValueError::InvalidCountry(country("ZZZ")));
    }

    #[tokio::test]
    async fn ranks_descending_and_skips_failures() {
        // GBR fails (no CPI data); JPN and USA succeed
        let candidates = [country("JPN"), country("USA"), country("GBR")];
        let ranked = ranker(20)
            .rank(&country("AUS"), None, &candidates)
            .await
            .unwrap();

        let order: Vec<&str> = ranked.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["JPN", "USA"]);
        assert!((ranked[0].index - 1.2).abs() < 1e-9);
        assert!((ranked[1].index - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn skips_unmapped_and_unsupported_candidates() {
        // MEX has no directory entry; NZL maps to NZD which the provider
        // does not support
        let candidates = [country("MEX"), country("NZL"), country("JPN")];
        let ranked = ranker(20)
            .rank(&country("AUS"), None, &candidates)
            .await
            .unwrap();

        let order: Vec<&str> = ranked.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["JPN"]);
    }

    #[tokio::test]
    async fn ties_keep_candidate_list_order() {
        let forward = ranker(20)
            .rank(&country("AUS"), None, &[country("JPN"), country("CAN")])
            .await
            .unwrap();
        let order: Vec<&str> = forward.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["JPN", "CAN"]);

        let reversed = ranker(20)
            .rank(&country("AUS"), None, &[country("CAN"), country("JPN")])
            .await
            .unwrap();
        let order: Vec<&str> = reversed.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["CAN", "JPN"]);
    }

    #[tokio::test]
    async fn batch_width_does_not_change_the_result() {
        let candidates = [
            country("JPN"),
            country("USA"),
            country("CAN"),
            country("GBR"),
            country("NZL"),
        ];

        let sequential = ranker(1)
            .rank(&country("AUS"), None, &candidates)
            .await
            .unwrap();
        let parallel = ranker(20)
            .rank(&country("AUS"), None, &candidates)
            .await
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[tokio::test]
    async fn zero_batch_width_is_clamped() {
        let ranked = ranker(0)
            .rank(&country("AUS"), None, &[country("JPN")])
            .await
            .unwrap();
        assert_eq!(ranked.len(), 1);
    }
}
