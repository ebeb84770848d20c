//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a quoting tool that means drifting tax totals and a CGST/SGST       │
//! │  split that doesn't add back to the tax figure on the document.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Tax math is integer division with explicit rounding, and the         │
//! │    two split halves are n/2 and n - n/2, so they ALWAYS sum to n.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quill_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary figure on a quote - unit prices, line subtotals, per-line
/// tax, aggregate totals, the tax split halves - flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount at the given per-product rate.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// i128 intermediate prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    /// use quill_core::types::TaxRate;
    ///
    /// let line = Money::from_cents(30_000);   // $300.00
    /// let rate = TaxRate::from_bps(1800);     // 18%
    ///
    /// let tax = line.calculate_tax(rate);
    /// assert_eq!(tax.cents(), 5400);          // $54.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_subtotal = unit_price.multiply_quantity(3);
    /// assert_eq!(line_subtotal.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Splits the amount into two halves that sum back exactly.
    ///
    /// ## Why Not Just n/2 Twice?
    /// An odd cent count would lose one cent (5/2 + 5/2 = 4). The second
    /// half absorbs the remainder: `(n/2, n - n/2)`, so
    /// `half1 + half2 == n` always holds.
    ///
    /// Used for the CGST/SGST presentation split on quote documents.
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// let (cgst, sgst) = Money::from_cents(5401).split_half();
    /// assert_eq!(cgst.cents(), 2700);
    /// assert_eq!(sgst.cents(), 2701);
    /// assert_eq!((cgst + sgst).cents(), 5401);
    /// ```
    #[inline]
    pub const fn split_half(&self) -> (Money, Money) {
        let first = self.0 / 2;
        (Money(first), Money(self.0 - first))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in the fixed `$D.CC` quote format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Parses a decimal money amount like "10.99", "$10.99", or "10".
///
/// ## Rules
/// - Optional leading `$`
/// - At most two fractional digits ("10.999" is rejected, not rounded)
/// - Negative amounts are rejected (quote inputs are non-negative)
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().trim_start_matches('$');
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("empty amount"));
        }

        let (major_str, minor_str) = match raw.split_once('.') {
            Some((maj, min)) => (maj, min),
            None => (raw, ""),
        };

        if minor_str.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
            || major_str.is_empty()
        {
            return Err(invalid("expected a non-negative decimal like 10.99"));
        }

        let major: i64 = major_str
            .parse()
            .map_err(|_| invalid("amount too large"))?;
        // "10.5" means 50 cents, not 5
        let minor: i64 = if minor_str.is_empty() {
            0
        } else if minor_str.len() == 1 {
            minor_str.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10
        } else {
            minor_str.parse().map_err(|_| invalid("bad cents"))?
        };

        Ok(Money::from_major_minor(major, minor))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_tax_calculation_basic() {
        // $300.00 at 18% = $54.00
        let amount = Money::from_cents(30_000);
        let rate = TaxRate::from_bps(1800);
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.cents(), 5400);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // $10.00 at 8.25% = $0.825 → $0.83 (half-up rounding)
        let amount = Money::from_cents(1000);
        let rate = TaxRate::from_bps(825);
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.cents(), 83);
    }

    #[test]
    fn test_tax_zero_rate() {
        let amount = Money::from_cents(20_000);
        assert_eq!(amount.calculate_tax(TaxRate::zero()).cents(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_subtotal = unit_price.multiply_quantity(3);
        assert_eq!(line_subtotal.cents(), 897);
    }

    #[test]
    fn test_split_half_even() {
        let (a, b) = Money::from_cents(5400).split_half();
        assert_eq!(a.cents(), 2700);
        assert_eq!(b.cents(), 2700);
        assert_eq!((a + b).cents(), 5400);
    }

    #[test]
    fn test_split_half_odd_cent_sums_back_exactly() {
        // An odd tax total must still reassemble exactly
        let (a, b) = Money::from_cents(101).split_half();
        assert_eq!(a.cents(), 50);
        assert_eq!(b.cents(), 51);
        assert_eq!((a + b).cents(), 101);

        let (a, b) = Money::zero().split_half();
        assert_eq!((a + b).cents(), 0);
    }

    #[test]
    fn test_parse_money() {
        assert_eq!("10.99".parse::<Money>().unwrap().cents(), 1099);
        assert_eq!("$10.99".parse::<Money>().unwrap().cents(), 1099);
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("0.05".parse::<Money>().unwrap().cents(), 5);

        assert!("10.999".parse::<Money>().is_err());
        assert!("-10".parse::<Money>().is_err());
        assert!("ten".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }
}
