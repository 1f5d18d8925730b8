//! World Bank CPI CSV loader.
//!
//! The World Bank export is wide-format, with a few metadata rows before
//! the header:
//!
//! ```text
//! Data Source,World Development Indicators,
//! Last Updated Date,2026-01-28,
//!
//! Country Name,Country Code,Indicator Name,Indicator Code,1960,1961,...
//! Australia,AUS,"Consumer price index (2010 = 100)",FP.CPI.TOTL,7.9,8.1,...
//! ```
//!
//! Empty cells mean the year is absent. Non-positive values are dropped
//! with a warning since CPI is positive by invariant.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::domain::CountryCode;

use super::store::CpiTable;

/// Errors from loading the World Bank CSV export.
#[derive(Debug, thiserror::Error)]
pub enum CpiLoadError {
    #[error("failed to read CPI csv: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CPI csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("CPI csv has no Country Code header row")]
    MissingHeader,

    #[error("CPI csv contains no usable rows")]
    Empty,
}

/// Load the CPI table from a World Bank CSV file on disk.
pub fn load_world_bank_csv(path: impl AsRef<Path>) -> Result<CpiTable, CpiLoadError> {
    let file = std::fs::File::open(path)?;
    parse_world_bank_csv(file)
}

/// Parse the CPI table from a World Bank CSV reader.
pub fn parse_world_bank_csv(reader: impl Read) -> Result<CpiTable, CpiLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut records = csv_reader.records();

    // Scan past the metadata rows to the real header
    let mut year_columns: Vec<(usize, i32)> = Vec::new();
    let mut code_column = None;
    for record in records.by_ref() {
        let record = record?;
        if record.iter().any(|cell| cell.trim() == "Country Code") {
            for (column, cell) in record.iter().enumerate() {
                let cell = cell.trim();
                if cell == "Country Code" {
                    code_column = Some(column);
                } else if let Ok(year) = cell.parse::<i32>() {
                    year_columns.push((column, year));
                }
            }
            break;
        }
    }
    let Some(code_column) = code_column else {
        return Err(CpiLoadError::MissingHeader);
    };

    let mut table = CpiTable::new();
    for record in records {
        let record = record?;
        let Some(code_cell) = record.get(code_column) else {
            continue;
        };
        // Aggregate rows (regions, income groups) use non-country codes
        // like "EUU" too; anything parseable is kept and simply never
        // queried if it is not in the directory.
        let Ok(country) = CountryCode::parse_normalized(code_cell.trim()) else {
            continue;
        };

        let mut series = BTreeMap::new();
        for (column, year) in &year_columns {
            let Some(cell) = record.get(*column) else {
                continue;
            };
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let Ok(value) = cell.parse::<f64>() else {
                warn!(country = %country, year, cell, "unparsable CPI cell, skipping");
                continue;
            };
            if !(value.is_finite() && value > 0.0) {
                warn!(country = %country, year, value, "dropping non-positive CPI value");
                continue;
            }
            series.insert(*year, value);
        }

        if !series.is_empty() {
            table.insert(country, series);
        }
    }

    if table.is_empty() {
        return Err(CpiLoadError::Empty);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    const SAMPLE: &str = "\
Data Source,World Development Indicators,\n\
Last Updated Date,2026-01-28,\n\
,\n\
Country Name,Country Code,Indicator Name,Indicator Code,2020,2021,2022\n\
Australia,AUS,\"Consumer price index (2010 = 100)\",FP.CPI.TOTL,120.81,124.27,132.47\n\
Japan,JPN,\"Consumer price index (2010 = 100)\",FP.CPI.TOTL,,101.8,104.3\n";

    #[test]
    fn parses_world_bank_export() {
        let table = parse_world_bank_csv(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[&country("AUS")][&2020], 120.81);
        assert_eq!(table[&country("AUS")][&2022], 132.47);
    }

    #[test]
    fn empty_cells_are_absent_years() {
        let table = parse_world_bank_csv(SAMPLE.as_bytes()).unwrap();
        assert!(!table[&country("JPN")].contains_key(&2020));
        assert_eq!(table[&country("JPN")][&2021], 101.8);
    }

    #[test]
    fn drops_non_positive_values() {
        let csv = "\
Country Name,Country Code,Indicator Name,Indicator Code,2020,2021\n\
Testland,TST,CPI,FP.CPI.TOTL,-3.0,99.0\n";
        let table = parse_world_bank_csv(csv.as_bytes()).unwrap();
        assert!(!table[&country("TST")].contains_key(&2020));
        assert_eq!(table[&country("TST")][&2021], 99.0);
    }

    #[test]
    fn missing_header_is_an_error() {
        let csv = "Data Source,World Development Indicators\nAustralia,AUS,120.81\n";
        assert!(matches!(
            parse_world_bank_csv(csv.as_bytes()),
            Err(CpiLoadError::MissingHeader)
        ));
    }

    #[test]
    fn rows_without_values_are_dropped() {
        let csv = "\
Country Name,Country Code,Indicator Name,Indicator Code,2020\n\
Australia,AUS,CPI,FP.CPI.TOTL,120.81\n\
Nowhere,NWH,CPI,FP.CPI.TOTL,\n";
        let table = parse_world_bank_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.contains_key(&country("NWH")));
    }

    #[test]
    fn loads_from_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();

        let table = load_world_bank_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }
}
