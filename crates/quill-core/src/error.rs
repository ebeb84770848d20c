//! # Error Types
//!
//! Domain-specific error types for quill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quill-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quill-store errors (separate crate)                                   │
//! │  └── StoreError       - Key-value store failures                       │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (message + exit code)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → CliError → User      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (quote number, product id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Client address failed validation when finalizing a quote.
    ///
    /// ## When This Occurs
    /// - Save or preview requested with an incomplete/invalid address
    ///
    /// The in-progress draft is left untouched for correction.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[source] ValidationError),

    /// A line item index was out of bounds for the draft.
    #[error("No line item at index {index} (draft has {len} items)")]
    ItemIndexOutOfBounds { index: usize, len: usize },

    /// Quote has exceeded the maximum allowed line items.
    #[error("Quote cannot have more than {max} line items")]
    TooManyItems { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad zip code, malformed money amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TooManyItems { max: 100 };
        assert_eq!(err.to_string(), "Quote cannot have more than 100 line items");

        let err = CoreError::ItemIndexOutOfBounds { index: 3, len: 2 };
        assert_eq!(err.to_string(), "No line item at index 3 (draft has 2 items)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "clientName".to_string(),
        };
        assert_eq!(err.to_string(), "clientName is required");

        let err = ValidationError::InvalidFormat {
            field: "zipCode".to_string(),
            reason: "must be 5 digits, optionally -4".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "zipCode has invalid format: must be 5 digits, optionally -4"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "clientName".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
