//! Application state for the web layer.

use std::sync::Arc;

use crate::directory::CurrencyDirectory;
use crate::value::{
    DestinationRanker, PriceIndexProvider, RateProvider, RealRateCalculator, TravelValueIndexer,
    ValueConfig,
};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Country ↔ currency reference table
    pub directory: Arc<CurrencyDirectory>,

    /// Exchange-rate provider (for the currency listing endpoint)
    pub rates: Arc<dyn RateProvider>,

    /// Index computation for one country pair
    pub indexer: Arc<TravelValueIndexer>,

    /// Ranking over the whole directory
    pub ranker: Arc<DestinationRanker>,

    /// Engine configuration defaults
    pub config: Arc<ValueConfig>,
}

impl AppState {
    /// Create a new app state, wiring the engine onto the given providers.
    pub fn new(
        directory: Arc<CurrencyDirectory>,
        rates: Arc<dyn RateProvider>,
        prices: Arc<dyn PriceIndexProvider>,
        config: ValueConfig,
    ) -> Self {
        let calculator =
            RealRateCalculator::new(Arc::clone(&directory), Arc::clone(&rates), prices);
        let indexer = TravelValueIndexer::new(calculator);
        let ranker = DestinationRanker::new(
            indexer.clone(),
            Arc::clone(&directory),
            Arc::clone(&rates),
            config.clone(),
        );

        Self {
            directory,
            rates,
            indexer: Arc::new(indexer),
            ranker: Arc::new(ranker),
            config: Arc::new(config),
        }
    }
}
