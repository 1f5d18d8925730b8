//! Country/currency reference directory.
//!
//! Maps country codes to currency codes and back. Loaded once at startup
//! from a static JSON reference dataset and read-only thereafter, so it is
//! safe for unsynchronized concurrent reads by any number of workers.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{CountryCode, CurrencyCode};

/// Errors from loading the directory dataset.
///
/// A malformed dataset is a fatal initialization error; lookups against a
/// loaded directory never fail, they return absence.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read countries dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse countries dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed directory entry for {country:?}: {reason}")]
    MalformedEntry { country: String, reason: String },

    #[error("countries dataset contains no entries")]
    Empty,
}

/// One country in the reference dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub country: CountryCode,
    pub currency: CurrencyCode,
    pub display_name: String,
}

/// Raw JSON shape of one entry.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "countryCode")]
    country_code: String,
    #[serde(rename = "currencyCode")]
    currency_code: String,
    #[serde(rename = "displayName", alias = "name")]
    display_name: String,
}

/// The dataset is either a plain list or wrapped in a `countries` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDataset {
    Wrapped { countries: Vec<RawEntry> },
    Plain(Vec<RawEntry>),
}

/// Immutable country ↔ currency lookup table.
///
/// Currencies need not be unique (euro-zone countries share EUR); the
/// reverse lookup deterministically returns the first-loaded country.
#[derive(Debug, Clone)]
pub struct CurrencyDirectory {
    entries: Vec<DirectoryEntry>,
    by_country: HashMap<CountryCode, CurrencyCode>,
    by_currency: HashMap<CurrencyCode, CountryCode>,
}

impl CurrencyDirectory {
    /// Load the directory from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Parse the directory from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        let raw_entries = match raw {
            RawDataset::Wrapped { countries } => countries,
            RawDataset::Plain(entries) => entries,
        };

        let mut entries = Vec::with_capacity(raw_entries.len());
        for raw in raw_entries {
            let country = CountryCode::parse_normalized(&raw.country_code).map_err(|e| {
                DirectoryError::MalformedEntry {
                    country: raw.country_code.clone(),
                    reason: e.to_string(),
                }
            })?;
            let currency = CurrencyCode::parse_normalized(&raw.currency_code).map_err(|e| {
                DirectoryError::MalformedEntry {
                    country: raw.country_code.clone(),
                    reason: e.to_string(),
                }
            })?;
            entries.push(DirectoryEntry {
                country,
                currency,
                display_name: raw.display_name,
            });
        }

        if entries.is_empty() {
            return Err(DirectoryError::Empty);
        }

        let mut by_country = HashMap::with_capacity(entries.len());
        let mut by_currency = HashMap::with_capacity(entries.len());
        for entry in &entries {
            by_country.insert(entry.country, entry.currency);
            // First-loaded wins for shared currencies
            by_currency.entry(entry.currency).or_insert(entry.country);
        }

        Ok(Self {
            entries,
            by_country,
            by_currency,
        })
    }

    /// Look up the currency for a country. Absence is a normal condition
    /// for unsupported countries, not an error.
    pub fn country_to_currency(&self, country: &CountryCode) -> Option<CurrencyCode> {
        self.by_country.get(country).copied()
    }

    /// Look up a country using a currency. When several countries share the
    /// currency, returns the first-loaded one.
    pub fn currency_to_country(&self, currency: &CurrencyCode) -> Option<CountryCode> {
        self.by_currency.get(currency).copied()
    }

    /// All entries, in dataset order.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// All country codes, in dataset order.
    pub fn countries(&self) -> Vec<CountryCode> {
        self.entries.iter().map(|e| e.country).collect()
    }

    /// Number of entries in the directory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory is empty. Never true for a loaded directory.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
