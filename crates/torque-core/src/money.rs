//! # Prices and Percentages
//!
//! `Money` holds whole cents; `Rate` holds millionths of the whole (ppm).
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Price sums          integer cents, exact in any order                  │
//! │    5_249_000 + 250_000 + 10_500 = 5_509_500                             │
//! │                                                                         │
//! │  Down payment        cents × ppm / 1_000_000, half-up to the cent       │
//! │                                                                         │
//! │  Monthly payment     f64 amortization, rounded once to the cent         │
//! │                      by Money::from_major_rounded                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use torque_core::money::{Money, Rate};
//!
//! let base = Money::from_dollars(52_490);
//! let total = base + Money::from_dollars(2_500);
//! assert_eq!(total.to_string(), "$54,990.00");
//!
//! let down = total.percent_of(Rate::from_percentage(10.0));
//! assert_eq!(down.cents(), 549_900);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps, even when a table is odd
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as integer cents** in catalog files and display payloads
///
/// ## Where Money is Used
/// ```text
/// PriceTable.base_price ──┬──► compute_total_price ──► "$55,095"
///                         │
/// PriceTable.options ─────┤
/// PriceTable.accessories ─┘            │
///                                      ▼
///                          compute_financing ──► down payment, monthly
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use torque_core::money::Money;
    ///
    /// let sunshade = Money::from_cents(10_500);
    /// assert_eq!(sunshade.dollars(), 105);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    ///
    /// Every catalog price is a whole-dollar amount, so this is how the
    /// standard price table is written.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Converts a real-valued dollar amount to Money, rounding to the nearest
    /// cent (half away from zero).
    ///
    /// Only amortization results go through here. Non-finite input yields zero.
    pub fn from_major_rounded(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    ///
    /// ## Example
    /// ```rust
    /// use torque_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(550_950).dollars(), 5_509);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in dollars as a float, for amortization math only.
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Takes a percentage of this amount, rounded to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * ppm + 500_000) / 1_000_000`, rounding half-up.
    ///
    /// ## Example
    /// ```rust
    /// use torque_core::money::{Money, Rate};
    ///
    /// let total = Money::from_dollars(55_095);
    /// let down = total.percent_of(Rate::from_bps(1_000)); // 10%
    /// assert_eq!(down.cents(), 550_950); // $5,509.50
    /// ```
    pub fn percent_of(&self, rate: Rate) -> Money {
        // i128 keeps large totals from overflowing during the multiply
        let cents = (self.0 as i128 * rate.ppm() as i128 + 500_000) / 1_000_000;
        Money::from_cents(cents as i64)
    }

    /// Formats the amount, dropping the cents when they are zero.
    ///
    /// Used for the headline total, which is always whole dollars.
    ///
    /// ## Example
    /// ```rust
    /// use torque_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(55_095).format_compact(), "$55,095");
    /// assert_eq!(Money::from_cents(550_950).format_compact(), "$5,509.50");
    /// ```
    pub fn format_compact(&self) -> String {
        if self.cents_part() == 0 {
            let sign = if self.0 < 0 { "-" } else { "" };
            format!("{}${}", sign, group_thousands(self.dollars().unsigned_abs()))
        } else {
            self.to_string()
        }
    }
}

/// Inserts `,` between every group of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Grouped thousands with two decimals: `$55,095.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            group_thousands(self.dollars().unsigned_abs()),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A percentage held in parts per million of the whole.
///
/// 1 ppm = 0.0001%, so any percentage typed with up to four decimal places
/// is held exactly: 6.875% = 68_750 ppm, 10% = 100_000 ppm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

/// Decimal places of a percentage that `Rate` holds exactly.
pub const RATE_PERCENT_DECIMALS: usize = 4;

impl Rate {
    /// Creates a rate from basis points (1 bps = 100 ppm).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps * 100)
    }

    #[inline]
    pub const fn from_ppm(ppm: u32) -> Self {
        Rate(ppm)
    }

    /// Creates a rate from a percentage (`3.0` = 3%), rounded to the
    /// nearest ppm.
    ///
    /// Negative and non-finite values clamp to zero; callers that care
    /// validate first.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Rate(0);
        }
        Rate((pct * 10_000.0).round().min(u32::MAX as f64) as u32)
    }

    #[inline]
    pub const fn ppm(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (`68_750 ppm` = `6.875`).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the rate as a fraction (`30_000 ppm` = `0.03`).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
