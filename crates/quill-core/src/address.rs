//! # Address Reconciliation
//!
//! Two address representations coexist across the tool's history: a single
//! free-text block, and the structured record below. This module converts
//! between them and validates the structured form.
//!
//! ## Conversion Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Address { street, city, state, zip }                                  │
//! │        │                          ▲                                     │
//! │        │ format()                 │ parse_legacy()  (LOSSY:            │
//! │        ▼                          │   street only, rest empty)         │
//! │  "12 Main St\nSpringfield, IL 62701"                                   │
//! │                                                                         │
//! │  format(parse_legacy(format(a))) reproduces the street line of `a`     │
//! │  exactly; city/state/zip survive only when the structured form is      │
//! │  used throughout. Callers upgrading stored records must preserve the   │
//! │  original text alongside (see Company::legacy_address).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A structured postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    /// True when every field is blank (an untouched form).
    pub fn is_empty(&self) -> bool {
        self.street.trim().is_empty()
            && self.city.trim().is_empty()
            && self.state.trim().is_empty()
            && self.zip_code.trim().is_empty()
    }

    /// Formats the address as display text: street on its own line,
    /// then "city, state zip".
    pub fn format(&self) -> String {
        format!(
            "{}\n{}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }

    /// Best-effort parse of a legacy free-text address.
    ///
    /// The part before the first newline becomes the street; the remainder
    /// is NOT reverse-engineered into city/state/zip. Legacy blocks degrade
    /// to street-only - a documented lossy edge, which is why upgrade paths
    /// also preserve the original text verbatim.
    pub fn parse_legacy(text: &str) -> Address {
        let street = text.split('\n').next().unwrap_or("").trim().to_string();
        Address {
            street,
            ..Address::default()
        }
    }

    /// Validates the structured address.
    ///
    /// ## Rules
    /// - All four fields non-empty
    /// - Street: alphanumeric plus `space , . -`
    /// - City: letters plus `space . -`
    /// - State: letters and spaces only, at least 2 characters
    /// - Zip: 5 digits, optionally `-` and 4 more
    ///
    /// A failing address blocks quote save/preview; in-progress edits are
    /// never forcibly rejected while typing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let street = self.street.trim();
        if street.is_empty() {
            return Err(ValidationError::Required {
                field: "street".to_string(),
            });
        }
        if !street
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | ',' | '.' | '-'))
        {
            return Err(ValidationError::InvalidFormat {
                field: "street".to_string(),
                reason: "must contain only letters, numbers, spaces, and , . -".to_string(),
            });
        }

        let city = self.city.trim();
        if city.is_empty() {
            return Err(ValidationError::Required {
                field: "city".to_string(),
            });
        }
        if !city
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, ' ' | '.' | '-'))
        {
            return Err(ValidationError::InvalidFormat {
                field: "city".to_string(),
                reason: "must contain only letters, spaces, and . -".to_string(),
            });
        }

        let state = self.state.trim();
        if state.is_empty() {
            return Err(ValidationError::Required {
                field: "state".to_string(),
            });
        }
        if state.chars().count() < 2 {
            return Err(ValidationError::TooShort {
                field: "state".to_string(),
                min: 2,
            });
        }
        if !state.chars().all(|c| c.is_alphabetic() || c == ' ') {
            return Err(ValidationError::InvalidFormat {
                field: "state".to_string(),
                reason: "must contain only letters and spaces".to_string(),
            });
        }

        if !is_valid_zip(self.zip_code.trim()) {
            return Err(ValidationError::InvalidFormat {
                field: "zipCode".to_string(),
                reason: "must be 5 digits, optionally followed by -NNNN".to_string(),
            });
        }

        Ok(())
    }

    /// Convenience boolean form of [`Address::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Zip check: `\d{5}` optionally `-\d{4}`.
fn is_valid_zip(zip: &str) -> bool {
    let (five, plus_four) = match zip.split_once('-') {
        Some((a, b)) => (a, Some(b)),
        None => (zip, None),
    };
    if five.len() != 5 || !five.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match plus_four {
        None => true,
        Some(p) => p.len() == 4 && p.chars().all(|c| c.is_ascii_digit()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn springfield() -> Address {
        Address {
            street: "12 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(springfield().format(), "12 Main St\nSpringfield, IL 62701");
    }

    #[test]
    fn test_valid_address_passes() {
        assert!(springfield().is_valid());
    }

    #[test]
    fn test_alpha_zip_fails() {
        let mut addr = springfield();
        addr.zip_code = "ABCDE".to_string();
        assert!(!addr.is_valid());
    }

    #[test]
    fn test_zip_plus_four() {
        let mut addr = springfield();
        addr.zip_code = "62701-1234".to_string();
        assert!(addr.is_valid());

        addr.zip_code = "62701-12".to_string();
        assert!(!addr.is_valid());

        addr.zip_code = "627011234".to_string();
        assert!(!addr.is_valid());
    }

    #[test]
    fn test_missing_fields_fail() {
        let mut addr = springfield();
        addr.city = String::new();
        assert!(matches!(
            addr.validate(),
            Err(ValidationError::Required { field }) if field == "city"
        ));

        let empty = Address::default();
        assert!(!empty.is_valid());
    }

    #[test]
    fn test_city_rejects_digits() {
        let mut addr = springfield();
        addr.city = "Spr1ngfield".to_string();
        assert!(!addr.is_valid());
    }

    #[test]
    fn test_state_min_length() {
        let mut addr = springfield();
        addr.state = "I".to_string();
        assert!(!addr.is_valid());
    }

    #[test]
    fn test_parse_legacy_takes_first_line_only() {
        let parsed = Address::parse_legacy("12 Main St\nSpringfield, IL 62701");
        assert_eq!(parsed.street, "12 Main St");
        assert_eq!(parsed.city, "");
        assert_eq!(parsed.state, "");
        assert_eq!(parsed.zip_code, "");
    }

    #[test]
    fn test_legacy_roundtrip_preserves_street_exactly() {
        // Documented lossy path: street survives, the rest does not
        let original = springfield();
        let reparsed = Address::parse_legacy(&original.format());
        assert_eq!(reparsed.street, original.street);
        assert_eq!(
            Address::parse_legacy(&reparsed.format()).street,
            original.street
        );
    }

    #[test]
    fn test_parse_legacy_single_line() {
        let parsed = Address::parse_legacy("just a street");
        assert_eq!(parsed.street, "just a street");
        assert!(Address::parse_legacy("").street.is_empty());
    }
}
