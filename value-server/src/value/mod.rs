//! The travel value engine.
//!
//! Computes inflation-adjusted ("real") exchange rates from FX and CPI data,
//! composes them into a travel value index for one base/target country pair,
//! and ranks a whole candidate list concurrently against a base country.
//!
//! Everything here is a pure function of its inputs plus the injected
//! provider collaborators; there is no shared mutable state, which is what
//! makes the ranking fan-out safe without internal locks.

mod config;
mod index;
pub mod mock;
mod provider;
mod rank;
mod real_rate;

pub use config::ValueConfig;
pub use index::{TravelValueIndexer, TravelValueResult};
pub use provider::{PriceIndexProvider, RateProvider};
pub use rank::{DestinationRanker, RankedDestination};
pub use real_rate::RealRateCalculator;
