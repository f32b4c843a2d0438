//! # Error Types
//!
//! Domain-specific error types for torque-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  torque-core errors (this file)                                        │
//! │  ├── CoreError        - Unknown identifiers, catalog problems          │
//! │  └── ValidationError  - Raw input that cannot be used                  │
//! │                                                                         │
//! │  kiosk errors (in app)                                                 │
//! │  └── AppError         - Config, catalog file, I/O                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → log line               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these ever reach the shopper. A bad loan input falls back to its
//! default, a missing image falls back to the placeholder.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core configurator errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An exterior or interior color id/label is not part of the lineup.
    #[error("Unknown {section} color: {value}")]
    UnknownColor { section: String, value: String },

    /// A package/option id or label is not recognised.
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// An accessory id or label is not recognised.
    #[error("Unknown accessory: {0}")]
    UnknownAccessory(String),

    /// A catalog document could not be decoded.
    ///
    /// ## When This Occurs
    /// - A configured `catalog.json` has a typo in a color id
    /// - A price is written as a string instead of integer cents
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidCatalog(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while parsing the raw values of the loan input fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. "abc" for a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
