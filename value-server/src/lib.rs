//! Travel value index server.
//!
//! A web service that answers: "for a traveler from this country, which
//! destinations are currently cheap relative to their own historical norm?"
//! It combines exchange-rate and consumer-price-index series into real
//! (inflation-adjusted) exchange rates and ranks destinations by the ratio
//! of the current real rate to its long-run average.

pub mod cpi;
pub mod directory;
pub mod domain;
pub mod fx;
pub mod value;
pub mod web;
