//! # Money Module
//!
//! Provides the `Money` type for handling Rupiah amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Large Rupiah totals lose integer precision past 2^53:                  │
//! │    9007199254740993 becomes 9007199254740992 in a JS number             │
//! │                                                                         │
//! │  OUR SOLUTION: i64 whole Rupiah                                         │
//! │    The Rupiah has no circulating subunit, so one i64 = one amount.      │
//! │    No cents field, no decimals, no float anywhere in the engine.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gudang_core::money::Money;
//!
//! // Price per selected unit, entered directly by the user
//! let price = Money::from_rupiah(5_000);
//!
//! // Line total for 3 packs at Rp5.000 per pack
//! let total = price.line_total(3).unwrap();
//! assert_eq!(total.rupiah(), 15_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole Rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections/adjustments
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No minor unit**: Rupiah amounts in this system are whole numbers;
///   there is nothing to round
///
/// ## Where Money Flows
/// ```text
/// Product.default_price ──► DraftLine.price_per_unit ──► DraftLine.total_amount
///                                                              │
///                                     Draft totals ◄───────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole Rupiah.
    #[inline]
    pub const fn from_rupiah(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the amount in whole Rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies the per-unit price by a quantity to get a line total.
    ///
    /// The price is the price of the *selected* unit - it is never derived
    /// from a base-unit price via conversion factors. The quantity here is
    /// therefore the quantity the user typed, not total pieces.
    ///
    /// ## Example
    /// ```rust
    /// use gudang_core::money::Money;
    ///
    /// let price_per_pack = Money::from_rupiah(5_000);
    /// let total = price_per_pack.line_total(3).unwrap();
    /// assert_eq!(total.rupiah(), 15_000);
    /// ```
    ///
    /// ## Errors
    /// `AmountOverflow` if the multiplication leaves i64. Wrapping here
    /// would let a garbage total pass the stock ceiling check downstream.
    pub fn line_total(&self, quantity: i64) -> EngineResult<Money> {
        self.0
            .checked_mul(quantity)
            .map(Money)
            .ok_or(EngineError::AmountOverflow)
    }

    /// Adds two amounts, surfacing overflow instead of wrapping.
    ///
    /// Used by draft totals, where a hundred lines of large amounts can
    /// legitimately approach i64.
    pub fn checked_add(&self, other: Money) -> EngineResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(EngineError::AmountOverflow)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in the dashboard's Rupiah format.
///
/// ## Note
/// This is for logs and debugging. The frontend formats amounts itself
/// to handle locale preferences.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };

        // Group digits in threes with dots: 1250000 -> 1.250.000
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "{}Rp{}", sign, grouped)
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupiah() {
        let money = Money::from_rupiah(15_000);
        assert_eq!(money.rupiah(), 15_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_rupiah(15_000)), "Rp15.000");
        assert_eq!(format!("{}", Money::from_rupiah(1_250_000)), "Rp1.250.000");
        assert_eq!(format!("{}", Money::from_rupiah(500)), "Rp500");
        assert_eq!(format!("{}", Money::from_rupiah(-5_500)), "-Rp5.500");
        assert_eq!(format!("{}", Money::from_rupiah(0)), "Rp0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupiah(10_000);
        let b = Money::from_rupiah(5_000);

        assert_eq!((a + b).rupiah(), 15_000);
        assert_eq!((a - b).rupiah(), 5_000);
    }

    #[test]
    fn test_line_total() {
        let price = Money::from_rupiah(5_000);
        let total = price.line_total(3).unwrap();
        assert_eq!(total.rupiah(), 15_000);
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let price = Money::from_rupiah(i64::MAX);
        let result = price.line_total(2);
        assert!(matches!(result, Err(EngineError::AmountOverflow)));
    }

    #[test]
    fn test_checked_add_overflow_is_an_error() {
        let a = Money::from_rupiah(i64::MAX);
        let b = Money::from_rupiah(1);
        assert!(matches!(a.checked_add(b), Err(EngineError::AmountOverflow)));

        let c = Money::from_rupiah(2);
        assert_eq!(c.checked_add(c).unwrap().rupiah(), 4);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_rupiah(100);
        assert!(positive.is_positive());

        let negative = Money::from_rupiah(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().rupiah(), 100);
    }
}
