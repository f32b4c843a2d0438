//! # Validation Module
//!
//! Parsing of the raw loan input values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Loan Input Handling                                │
//! │                                                                         │
//! │  Input widget (external)                                                │
//! │  └── raw string, possibly absent or empty                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE                                                            │
//! │  ├── presence check (absent / blank → Required)                         │
//! │  ├── numeric parse (garbage, > 4 decimals → InvalidFormat)              │
//! │  └── loan sanity (term 0, negative % → OutOfRange)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  LoanTerms::from_raw: any error → documented default for that field     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use torque_core::validation::{parse_percentage, parse_term_months};
//!
//! assert_eq!(parse_term_months(Some("72")).unwrap(), 72);
//! assert!(parse_term_months(Some("")).is_err());
//! assert_eq!(parse_percentage("interest rate", Some("3.5"), 100).unwrap().ppm(), 35_000);
//! ```

use crate::error::ValidationError;
use crate::money::{Rate, RATE_PERCENT_DECIMALS};
use crate::MAX_TERM_MONTHS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Returns the trimmed value, or `Required` when absent or blank.
fn require<'a>(field: &str, raw: Option<&'a str>) -> ValidationResult<&'a str> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// Parses a loan term in whole months.
///
/// ## Rules
/// - Must be present
/// - Must be an integer
/// - Must be between 1 and `MAX_TERM_MONTHS`
pub fn parse_term_months(raw: Option<&str>) -> ValidationResult<u32> {
    let field = "loan term";
    let value = require(field, raw)?;

    let months: i64 = value.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a whole number of months", value),
    })?;

    validate_term_months(months)?;
    Ok(months as u32)
}

/// Checks a term in months is usable as an amortization period.
pub fn validate_term_months(months: i64) -> ValidationResult<()> {
    if !(1..=MAX_TERM_MONTHS as i64).contains(&months) {
        return Err(ValidationError::OutOfRange {
            field: "loan term".to_string(),
            min: 1,
            max: MAX_TERM_MONTHS as i64,
        });
    }
    Ok(())
}

/// Parses a percentage (`"3"` = 3%) into a `Rate`.
///
/// ## Rules
/// - Must be present
/// - Must be a plain decimal number (no exponent, no `inf`/`NaN`)
/// - At most `RATE_PERCENT_DECIMALS` decimal places, so the value is held
///   exactly
/// - Must be between 0 and `max_pct`
pub fn parse_percentage(field: &str, raw: Option<&str>, max_pct: u32) -> ValidationResult<Rate> {
    let value = require(field, raw)?;

    let invalid = |reason: String| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason,
    };

    let plain = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'));
    let pct = value
        .parse::<f64>()
        .ok()
        .filter(|_| plain)
        .ok_or_else(|| invalid(format!("'{}' is not a number", value)))?;

    let decimals = value.split_once('.').map_or(0, |(_, frac)| frac.len());
    if decimals > RATE_PERCENT_DECIMALS {
        return Err(invalid(format!(
            "'{}' has more than {} decimal places",
            value, RATE_PERCENT_DECIMALS
        )));
    }

    if pct < 0.0 || pct > max_pct as f64 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: max_pct as i64,
        });
    }

    Ok(Rate::from_percentage(pct))
}

// =============================================================================
// Unit Tests
// =============================================================================
