//! Consumer-price-index data.
//!
//! Yearly CPI values per country, loaded once at startup from the World
//! Bank wide-format CSV export. Values sit on an arbitrary base-year
//! scale, so only ratios between them carry meaning.

mod loader;
mod store;

pub use loader::{CpiLoadError, load_world_bank_csv, parse_world_bank_csv};
pub use store::{CpiStore, CpiTable};
