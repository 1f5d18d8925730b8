//! ECB historical CSV loader.
//!
//! The ECB `eurofxref-hist.csv` export is one row per day:
//!
//! ```text
//! Date,USD,JPY,BGN,CZK,...
//! 2026-01-30,1.1919,183.59,N/A,24.325,...
//! ```
//!
//! `N/A` and empty cells are skipped. Non-positive rates violate the data
//! invariant and are dropped with a warning rather than stored.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::CurrencyCode;

use super::store::FxTable;

/// Errors from loading the ECB CSV export.
#[derive(Debug, thiserror::Error)]
pub enum FxLoadError {
    #[error("failed to read FX csv: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse FX csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("FX csv does not start with a Date column")]
    MissingDateColumn,

    #[error("bad date {0:?} in FX csv")]
    BadDate(String),

    #[error("FX csv contains no usable rows")]
    Empty,
}

/// Load the EUR-base rate table from an ECB CSV file on disk.
pub fn load_ecb_csv(path: impl AsRef<Path>) -> Result<FxTable, FxLoadError> {
    let file = std::fs::File::open(path)?;
    parse_ecb_csv(file)
}

/// Parse the EUR-base rate table from an ECB CSV reader.
pub fn parse_ecb_csv(reader: impl Read) -> Result<FxTable, FxLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.get(0).map(str::trim) != Some("Date") {
        return Err(FxLoadError::MissingDateColumn);
    }

    // The export has a trailing comma, so the last column is unnamed;
    // anything that isn't a currency code is ignored.
    let currencies: Vec<Option<CurrencyCode>> = headers
        .iter()
        .skip(1)
        .map(|header| CurrencyCode::parse_normalized(header.trim()).ok())
        .collect();

    let mut table = FxTable::new();
    for record in csv_reader.records() {
        let record = record?;
        let Some(date_cell) = record.get(0) else {
            continue;
        };
        let date_cell = date_cell.trim();
        if date_cell.is_empty() {
            continue;
        }
        let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d")
            .map_err(|_| FxLoadError::BadDate(date_cell.to_string()))?;

        let mut day = std::collections::HashMap::new();
        for (column, currency) in currencies.iter().enumerate() {
            let Some(currency) = currency else { continue };
            let Some(cell) = record.get(column + 1) else {
                continue;
            };
            let cell = cell.trim();
            if cell.is_empty() || cell == "N/A" {
                continue;
            }
            let Ok(rate) = cell.parse::<f64>() else {
                warn!(date = %date, currency = %currency, cell, "unparsable FX cell, skipping");
                continue;
            };
            if !(rate.is_finite() && rate > 0.0) {
                warn!(date = %date, currency = %currency, rate, "dropping non-positive FX rate");
                continue;
            }
            day.insert(*currency, rate);
        }

        if !day.is_empty() {
            table.insert(date, day);
        }
    }

    if table.is_empty() {
        return Err(FxLoadError::Empty);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cur(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_ecb_export() {
        let csv = "Date,USD,JPY,BGN,\n\
                   2026-01-30,1.1919,183.59,N/A,\n\
                   2026-01-29,1.1900,182.80,1.9558,\n";
        let table = parse_ecb_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let newest = &table[&date(2026, 1, 30)];
        assert_eq!(newest[&cur("USD")], 1.1919);
        assert_eq!(newest[&cur("JPY")], 183.59);
        assert!(!newest.contains_key(&cur("BGN")));
        assert_eq!(table[&date(2026, 1, 29)][&cur("BGN")], 1.9558);
    }

    #[test]
    fn skips_empty_cells() {
        let csv = "Date,USD,JPY\n2026-01-30,,183.59\n";
        let table = parse_ecb_csv(csv.as_bytes()).unwrap();
        let day = &table[&date(2026, 1, 30)];
        assert!(!day.contains_key(&cur("USD")));
        assert_eq!(day[&cur("JPY")], 183.59);
    }

    #[test]
    fn drops_non_positive_rates() {
        let csv = "Date,USD,JPY\n2026-01-30,0.0,183.59\n";
        let table = parse_ecb_csv(csv.as_bytes()).unwrap();
        let day = &table[&date(2026, 1, 30)];
        assert!(!day.contains_key(&cur("USD")));
        assert_eq!(day[&cur("JPY")], 183.59);
    }

    #[test]
    fn missing_date_column_is_an_error() {
        let csv = "USD,JPY\n1.19,183.59\n";
        assert!(matches!(
            parse_ecb_csv(csv.as_bytes()),
            Err(FxLoadError::MissingDateColumn)
        ));
    }

    #[test]
    fn bad_date_is_an_error() {
        let csv = "Date,USD\n30/01/2026,1.19\n";
        assert!(matches!(
            parse_ecb_csv(csv.as_bytes()),
            Err(FxLoadError::BadDate(_))
        ));
    }

    #[test]
    fn all_unusable_rows_is_an_error() {
        let csv = "Date,USD\n2026-01-30,N/A\n";
        assert!(matches!(
            parse_ecb_csv(csv.as_bytes()),
            Err(FxLoadError::Empty)
        ));
    }

    #[test]
    fn loads_from_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Date,USD\n2026-01-30,1.19\n").unwrap();

        let table = load_ecb_csv(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }
}
