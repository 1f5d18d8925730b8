//! Currency code type.

use std::fmt;

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency code: {reason}")]
pub struct InvalidCurrencyCode {
    reason: &'static str,
}

/// A valid ISO 4217-style 3-letter currency code (e.g. "AUD").
///
/// Currency codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `CurrencyCode` value is valid by construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// The euro, used as the pivot currency by the FX store.
    pub const EUR: CurrencyCode = CurrencyCode(*b"EUR");

    /// Parse a currency code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCurrencyCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCurrencyCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCurrencyCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(CurrencyCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse a currency code, canonicalizing lowercase input to uppercase.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCurrencyCode> {
        Self::parse(&s.to_ascii_uppercase())
    }

    /// Returns the currency code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
