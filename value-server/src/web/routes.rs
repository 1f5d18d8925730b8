//! HTTP route handlers.
//!
//! The handlers translate error kinds into status codes: validation
//! failures are client errors, data-source failures are server errors, and
//! an empty ranking is "not found".

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::domain::{CountryCode, ValueError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/countries", get(list_countries))
        .route("/currencies", get(list_currencies))
        .route("/value/index", get(value_index))
        .route("/value/rank", get(value_rank))
        .with_state(state)
}

/// Service identity.
async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        description: "Travel value data API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all countries in the reference directory.
async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountryResult>> {
    let countries = state
        .directory
        .entries()
        .iter()
        .map(CountryResult::from)
        .collect();
    Json(countries)
}

/// List the currencies the rate provider has data for.
async fn list_currencies(State(state): State<AppState>) -> Json<CurrenciesResponse> {
    let mut currencies: Vec<String> = state
        .rates
        .supported_currencies()
        .await
        .iter()
        .map(|currency| currency.as_str().to_string())
        .collect();
    currencies.sort();
    Json(CurrenciesResponse { currencies })
}

/// Compute the travel value index for one base/target pair.
async fn value_index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Json<TravelValueResponse>, AppError> {
    let base = parse_country(&query.base)?;
    let target = parse_country(&query.target)?;
    let window_years = query.window_years.unwrap_or(state.config.window_years);

    let result = state.indexer.index(&base, &target, window_years).await?;
    Ok(Json(TravelValueResponse::from(result)))
}

/// Rank every directory country as a destination for the base country.
async fn value_rank(
    State(state): State<AppState>,
    Query(query): Query<RankQuery>,
) -> Result<Json<RankResponse>, AppError> {
    let base = parse_country(&query.base)?;
    let window_years = query.window_years.unwrap_or(state.config.window_years);

    let candidates = state.directory.countries();
    let ranked = state
        .ranker
        .rank(&base, Some(window_years), &candidates)
        .await?;

    if ranked.is_empty() {
        return Err(AppError::NotFound {
            message: format!("no destinations could be ranked for {base}"),
        });
    }

    Ok(Json(RankResponse {
        base: base.as_str().to_string(),
        window_years,
        destinations: ranked.iter().map(RankedDestinationResult::from).collect(),
    }))
}

fn parse_country(raw: &str) -> Result<CountryCode, AppError> {
    CountryCode::parse_normalized(raw).map_err(|_| AppError::BadRequest {
        message: format!("invalid country code: {raw}"),
    })
}

/// Application-level errors that convert to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ValueError> for AppError {
    fn from(err: ValueError) -> Self {
        match err {
            // Caller input error
            ValueError::InvalidCountry(_) => AppError::BadRequest {
                message: err.to_string(),
            },
            // Everything else reflects the state of the data sources
            ValueError::MissingRateData { .. }
            | ValueError::MissingPriceData(_)
            | ValueError::InsufficientHistory { .. }
            | ValueError::DataIntegrityFault(_) => AppError::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = %status, error = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyCode;

    fn country(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    #[test]
    fn invalid_country_maps_to_bad_request() {
        let err = AppError::from(ValueError::InvalidCountry(country("ZZZ")));
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[test]
    fn data_failures_map_to_internal() {
        let err = AppError::from(ValueError::MissingRateData {
            base: CurrencyCode::parse("AUD").unwrap(),
            target: CurrencyCode::parse("JPY").unwrap(),
        });
        assert!(matches!(err, AppError::Internal { .. }));

        let err = AppError::from(ValueError::MissingPriceData(country("AUS")));
        assert!(matches!(err, AppError::Internal { .. }));

        let err = AppError::from(ValueError::InsufficientHistory {
            base: country("AUS"),
            target: country("JPN"),
            window_years: 20,
        });
        assert!(matches!(err, AppError::Internal { .. }));

        let err = AppError::from(ValueError::DataIntegrityFault("bad CPI".into()));
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn error_statuses() {
        let response = AppError::BadRequest {
            message: "bad".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::NotFound {
            message: "none".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Internal {
            message: "boom".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn parse_country_normalizes() {
        assert_eq!(parse_country("aus").unwrap(), country("AUS"));
        assert!(parse_country("australia").is_err());
    }
}
