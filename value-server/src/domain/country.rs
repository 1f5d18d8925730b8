//! Country code type.

use std::fmt;

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code: {reason}")]
pub struct InvalidCountryCode {
    reason: &'static str,
}

/// A valid ISO-style 3-letter country code (e.g. "AUS").
///
/// Country codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `CountryCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use value_server::domain::CountryCode;
///
/// let aus = CountryCode::parse("AUS").unwrap();
/// assert_eq!(aus.as_str(), "AUS");
///
/// // Lowercase is rejected by the strict parser...
/// assert!(CountryCode::parse("aus").is_err());
///
/// // ...but normalized at ingress boundaries
/// assert_eq!(CountryCode::parse_normalized("aus").unwrap().as_str(), "AUS");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryCode([u8; 3]);

impl CountryCode {
    /// Parse a country code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCountryCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCountryCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(CountryCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse a country code, canonicalizing lowercase input to uppercase.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCountryCode> {
        Self::parse(&s.to_ascii_uppercase())
    }

    /// Returns the country code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(CountryCode::parse("AUS").is_ok());
        assert!(CountryCode::parse("USA").is_ok());
        assert!(CountryCode::parse("JPN").is_ok());
        assert!(CountryCode::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(CountryCode::parse("aus").is_err());
        assert!(CountryCode::parse("Aus").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(CountryCode::parse("").is_err());
        assert!(CountryCode::parse("AU").is_err());
        assert!(CountryCode::parse("AUST").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(CountryCode::parse("A1S").is_err());
        assert!(CountryCode::parse("A-S").is_err());
        assert!(CountryCode::parse("A S").is_err());
    }

    #[test]
    fn normalized_uppercases() {
        let code = CountryCode::parse_normalized("jpn").unwrap();
        assert_eq!(code.as_str(), "JPN");
        assert_eq!(code, CountryCode::parse("JPN").unwrap());
    }

    #[test]
    fn display_and_debug() {
        let code = CountryCode::parse("AUS").unwrap();
        assert_eq!(format!("{}", code), "AUS");
        assert_eq!(format!("{:?}", code), "CountryCode(AUS)");
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(CountryCode::parse("AUS").unwrap());
        assert!(set.contains(&CountryCode::parse("AUS").unwrap()));
        assert!(!set.contains(&CountryCode::parse("USA").unwrap()));
    }
}
