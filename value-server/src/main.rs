use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use value_server::cpi::{self, CpiStore};
use value_server::directory::CurrencyDirectory;
use value_server::fx::{self, FxProvider, FxRefreshClient, FxStore, RefreshConfig};
use value_server::value::{RateProvider, ValueConfig};
use value_server::web::{AppState, create_router};

/// How often to fetch fresh EUR rates (24 hours).
const FX_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let countries_path =
        std::env::var("COUNTRIES_PATH").unwrap_or_else(|_| "data/countries.json".to_string());
    let fx_path =
        std::env::var("FX_HISTORY_PATH").unwrap_or_else(|_| "data/eurofxref-hist.csv".to_string());
    let cpi_path =
        std::env::var("CPI_PATH").unwrap_or_else(|_| "data/world_bank_cpi.csv".to_string());

    // Load reference and market data (fail fast if unavailable)
    let directory = Arc::new(
        CurrencyDirectory::load(&countries_path).expect("Failed to load countries dataset"),
    );
    println!("Loaded {} countries", directory.len());

    let fx_table = fx::load_ecb_csv(&fx_path).expect("Failed to load FX history");
    let fx_store = FxStore::new(fx_table);
    println!("Loaded {} days of FX data", fx_store.day_count().await);

    let cpi_table = cpi::load_world_bank_csv(&cpi_path).expect("Failed to load CPI data");
    let prices = CpiStore::new(cpi_table);
    println!("Loaded CPI data for {} countries", prices.country_count());

    // Spawn background task to fetch fresh EUR rates daily
    match FxRefreshClient::new(&RefreshConfig::default()) {
        Ok(client) => {
            let refresh_store = fx_store.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(FX_REFRESH_INTERVAL);
                interval.tick().await; // First tick is immediate, skip it
                loop {
                    interval.tick().await;
                    match client.refresh_into(&refresh_store).await {
                        Ok(count) => println!("Refreshed FX rates: {count} currencies"),
                        Err(e) => eprintln!("Failed to refresh FX rates: {e}"),
                    }
                }
            });
        }
        Err(e) => eprintln!("Warning: FX refresh disabled: {e}"),
    }

    // Build app state
    let rates: Arc<dyn RateProvider> = Arc::new(FxProvider::new(fx_store));
    let state = AppState::new(directory, rates, Arc::new(prices), ValueConfig::default());

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Travel value server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health       - Health check");
    println!("  GET /countries    - Reference directory");
    println!("  GET /currencies   - Supported currencies");
    println!("  GET /value/index  - Index for one base/target pair");
    println!("  GET /value/rank   - Rank all destinations for a base country");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
