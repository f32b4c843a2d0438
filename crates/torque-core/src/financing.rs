//! # Financing
//!
//! Down payment and amortized monthly payment for a total price.
//!
//! ## Formula
//! ```text
//! down      = total × down%
//! principal = total − down
//! r         = annual% / 12
//! n         = term in months
//!
//!            principal × r × (1 + r)^n
//! monthly = ─────────────────────────────     (r > 0)
//!               (1 + r)^n − 1
//!
//! monthly = principal / n                     (r = 0)
//! ```
//! The `r = 0` branch is the limit of the general formula; without it the
//! general formula divides zero by zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, Rate};
use crate::validation::{parse_percentage, parse_term_months, ValidationResult};
use crate::{DEFAULT_DOWN_PAYMENT_PCT, DEFAULT_INTEREST_RATE_PCT, DEFAULT_TERM_MONTHS};

// =============================================================================
// Loan Terms
// =============================================================================

/// Inputs to the loan estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoanTerms {
    /// Number of monthly payments, always at least 1.
    pub term_months: u32,
    /// Nominal annual interest rate.
    pub annual_rate: Rate,
    /// Share of the total paid up front.
    pub down_payment: Rate,
}

impl Default for LoanTerms {
    /// 60 months, 3% APR, 10% down.
    fn default() -> Self {
        LoanTerms {
            term_months: DEFAULT_TERM_MONTHS,
            annual_rate: Rate::from_bps(DEFAULT_INTEREST_RATE_PCT * 100),
            down_payment: Rate::from_bps(DEFAULT_DOWN_PAYMENT_PCT * 100),
        }
    }
}

/// Raw values as read from the loan input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawLoanInputs {
    #[serde(default)]
    pub term_months: Option<String>,
    #[serde(default)]
    pub interest_rate: Option<String>,
    #[serde(default)]
    pub down_payment_percentage: Option<String>,
}

/// Result of reading the loan inputs: the terms to use, plus the reason for
/// every field that fell back to its default.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLoanTerms {
    pub terms: LoanTerms,
    pub fallbacks: Vec<ValidationError>,
}

impl LoanTerms {
    /// Reads loan terms from raw inputs. Never fails: each field that is
    /// absent, blank or unusable takes its default.
    ///
    /// ## Example
    /// ```rust
    /// use torque_core::financing::{LoanTerms, RawLoanInputs};
    ///
    /// let parsed = LoanTerms::from_raw(&RawLoanInputs {
    ///     term_months: Some("72".into()),
    ///     interest_rate: Some("oops".into()),
    ///     down_payment_percentage: None,
    /// });
    /// assert_eq!(parsed.terms.term_months, 72);
    /// assert_eq!(parsed.terms.annual_rate.ppm(), 30_000);
    /// assert_eq!(parsed.fallbacks.len(), 2);
    /// ```
    pub fn from_raw(raw: &RawLoanInputs) -> ParsedLoanTerms {
        let defaults = LoanTerms::default();
        let mut fallbacks = Vec::new();

        let term_months = or_default(
            parse_term_months(raw.term_months.as_deref()),
            defaults.term_months,
            &mut fallbacks,
        );
        let annual_rate = or_default(
            parse_percentage("interest rate", raw.interest_rate.as_deref(), 100),
            defaults.annual_rate,
            &mut fallbacks,
        );
        let down_payment = or_default(
            parse_percentage(
                "down payment percentage",
                raw.down_payment_percentage.as_deref(),
                100,
            ),
            defaults.down_payment,
            &mut fallbacks,
        );

        ParsedLoanTerms {
            terms: LoanTerms {
                term_months,
                annual_rate,
                down_payment,
            },
            fallbacks,
        }
    }
}

fn or_default<T>(result: ValidationResult<T>, default: T, fallbacks: &mut Vec<ValidationError>) -> T {
    result.unwrap_or_else(|err| {
        fallbacks.push(err);
        default
    })
}

// =============================================================================
// Financing
// =============================================================================

/// The payment breakdown shown under the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Financing {
    pub down_payment: Money,
    pub loan_amount: Money,
    pub monthly_payment: Money,
    /// Sum of all monthly payments minus the loan amount.
    pub total_interest: Money,
}

/// Computes the down payment and monthly payment for `total`.
///
/// ## Example
/// ```rust
/// use torque_core::financing::{compute_financing, LoanTerms};
/// use torque_core::money::Money;
///
/// let financing = compute_financing(Money::from_dollars(55_095), &LoanTerms::default());
/// assert_eq!(financing.down_payment.to_string(), "$5,509.50");
/// assert!(financing.monthly_payment.is_positive());
/// ```
pub fn compute_financing(total: Money, terms: &LoanTerms) -> Financing {
    let down_payment = total.percent_of(terms.down_payment);
    let loan_amount = total - down_payment;
    let term = terms.term_months.max(1);

    let monthly = monthly_payment(loan_amount.as_major_f64(), terms.annual_rate, term);
    let monthly_payment = Money::from_major_rounded(monthly);

    let paid: i64 = monthly_payment.cents() * term as i64;
    let total_interest = Money::from_cents((paid - loan_amount.cents()).max(0));

    Financing {
        down_payment,
        loan_amount,
        monthly_payment,
        total_interest,
    }
}

/// Unrounded monthly payment in dollars.
pub fn monthly_payment(principal: f64, annual_rate: Rate, term_months: u32) -> f64 {
    let n = term_months.max(1) as f64;
    let r = annual_rate.fraction() / 12.0;

    if annual_rate.is_zero() {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(term_months: u32, rate_pct: f64, down_pct: f64) -> LoanTerms {
        LoanTerms {
            term_months,
            annual_rate: Rate::from_percentage(rate_pct),
            down_payment: Rate::from_percentage(down_pct),
        }
    }

    #[test]
    fn test_reference_financing() {
        let financing = compute_financing(Money::from_dollars(55_095), &terms(60, 3.0, 10.0));

        assert_eq!(financing.down_payment, Money::from_cents(550_950));
        assert_eq!(financing.loan_amount, Money::from_cents(4_958_550));

        // Independent evaluation of the amortization formula.
        let principal = 49_585.50_f64;
        let r: f64 = 0.03 / 12.0;
        let growth = (1.0 + r).powi(60);
        let expected = principal * r * growth / (growth - 1.0);

        let monthly = financing.monthly_payment.as_major_f64();
        assert!(monthly.is_finite() && monthly > 0.0);
        assert!((monthly - expected).abs() <= 0.006, "{monthly} vs {expected}");
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let financing = compute_financing(Money::from_dollars(60_000), &terms(60, 0.0, 0.0));
        assert_eq!(financing.monthly_payment, Money::from_dollars(1_000));
        assert_eq!(financing.total_interest, Money::zero());

        let raw = monthly_payment(1_000.0, Rate::zero(), 3);
        assert!((raw - 333.333_333).abs() < 1e-5);
    }

    #[test]
    fn test_full_down_payment_leaves_nothing_to_finance() {
        let financing = compute_financing(Money::from_dollars(52_490), &terms(60, 3.0, 100.0));
        assert_eq!(financing.loan_amount, Money::zero());
        assert_eq!(financing.monthly_payment, Money::zero());
    }

    #[test]
    fn test_single_payment_term() {
        // One month at 12% APR: principal plus one month of 1% interest.
        let raw = monthly_payment(1_000.0, Rate::from_percentage(12.0), 1);
        assert!((raw - 1_010.0).abs() < 1e-9);
    }

    #[test]
    fn test_interest_accrues() {
        let financing = compute_financing(Money::from_dollars(55_095), &LoanTerms::default());
        assert!(financing.total_interest.is_positive());
    }

    #[test]
    fn test_fractional_percentages_are_exact() {
        let parsed = LoanTerms::from_raw(&RawLoanInputs {
            term_months: Some("60".to_string()),
            interest_rate: Some("6.875".to_string()),
            down_payment_percentage: Some("12.345".to_string()),
        });
        assert!(parsed.fallbacks.is_empty());
        assert_eq!(parsed.terms.annual_rate.ppm(), 68_750);
        assert_eq!(parsed.terms.down_payment.ppm(), 123_450);

        let financing = compute_financing(Money::from_dollars(55_095), &parsed.terms);

        // 55,095 × 12.345% = 6,801.47775
        assert_eq!(financing.down_payment, Money::from_cents(680_148));

        let principal: f64 = 55_095.0 - 6_801.48;
        let r: f64 = 0.068_75 / 12.0;
        let growth = (1.0 + r).powi(60);
        let expected = principal * r * growth / (growth - 1.0);
        let monthly = financing.monthly_payment.as_major_f64();
        assert!((monthly - expected).abs() <= 0.006, "{monthly} vs {expected}");
    }

    #[test]
    fn test_from_raw_defaults() {
        let parsed = LoanTerms::from_raw(&RawLoanInputs::default());
        assert_eq!(parsed.terms, LoanTerms::default());
        assert_eq!(parsed.fallbacks.len(), 3);
    }

    #[test]
    fn test_from_raw_values() {
        let parsed = LoanTerms::from_raw(&RawLoanInputs {
            term_months: Some("48".to_string()),
            interest_rate: Some("0".to_string()),
            down_payment_percentage: Some("20".to_string()),
        });
        assert!(parsed.fallbacks.is_empty());
        assert_eq!(parsed.terms, terms(48, 0.0, 20.0));
    }

    #[test]
    fn test_from_raw_unusable_values_fall_back() {
        let parsed = LoanTerms::from_raw(&RawLoanInputs {
            term_months: Some("0".to_string()),
            interest_rate: Some("-3".to_string()),
            down_payment_percentage: Some("ten".to_string()),
        });
        assert_eq!(parsed.terms, LoanTerms::default());
        let fields: Vec<&str> = parsed.fallbacks.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["loan term", "interest rate", "down payment percentage"]);
    }
}
