//! Domain types for the travel value engine.
//!
//! This module contains the core identifier types and the error taxonomy.
//! Code types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod country;
mod currency;
mod error;

pub use country::{CountryCode, InvalidCountryCode};
pub use currency::{CurrencyCode, InvalidCurrencyCode};
pub use error::ValueError;
