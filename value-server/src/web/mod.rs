//! Web layer for the travel value server.
//!
//! Provides HTTP endpoints for computing the index of one country pair and
//! ranking all destinations against a base country.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
