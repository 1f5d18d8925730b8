//! Exchange-rate data.
//!
//! The FX dataset is EUR-based (one daily row of EUR→X rates per currency,
//! from the ECB historical export), so conversions between two non-EUR
//! currencies go through EUR: AUD→JPY is (1 / EUR→AUD) × (EUR→JPY).
//!
//! The store is refreshable in place: a background task fetches the latest
//! EUR rates from the Frankfurter API once a day and inserts them as a new
//! row.

mod loader;
mod provider;
mod refresh;
mod store;

pub use loader::{FxLoadError, load_ecb_csv, parse_ecb_csv};
pub use provider::FxProvider;
pub use refresh::{FxRefreshClient, RefreshConfig, RefreshError};
pub use store::{FxStore, FxTable};
