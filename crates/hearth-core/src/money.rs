//! # Money Module
//!
//! Provides the `Money` type for prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Catalog prices are whole rubles (89 990 ₽, 500 ₽ courier fee), so we  │
//! │  store the amount as an i64 count of currency units and never touch    │
//! │  floats. Cart totals are exact sums of price × quantity.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hearth_core::money::Money;
//!
//! let price = Money::from_units(1000);
//! let line = price.multiply_quantity(2);
//! let total = line + Money::from_units(500);
//!
//! assert_eq!(total.units(), 2500);
//! assert_eq!(total.to_string(), "2 500 ₽");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Symbol appended when a [`Money`] value is displayed.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₽";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for price differences
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: serializes as a bare number, matching the
///   `price` / `total` fields of persisted snapshots
/// - **Saturating arithmetic**: totals pin at the `i64` bounds instead of
///   overflowing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use hearth_core::money::Money;
    ///
    /// let price = Money::from_units(89990);
    /// assert_eq!(price.units(), 89990);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the amount in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use hearth_core::money::Money;
    ///
    /// let unit_price = Money::from_units(8990);
    /// assert_eq!(unit_price.multiply_quantity(2).units(), 17980);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Percentage saved going from `original` to `self`, rounded to the
    /// nearest whole percent. This is the "-17% OFF" badge on product cards.
    ///
    /// Returns `None` when `original` is not a real markdown (zero, negative
    /// or not above the current price).
    ///
    /// ## Example
    /// ```rust
    /// use hearth_core::money::Money;
    ///
    /// let price = Money::from_units(59990);
    /// let old = Money::from_units(69990);
    /// assert_eq!(price.discount_percent_from(old), Some(14));
    /// ```
    pub fn discount_percent_from(&self, original: Money) -> Option<u32> {
        if original.0 <= 0 || original.0 <= self.0 {
            return None;
        }
        let saved = original.0 as i128 - self.0 as i128;
        // Round half up: (saved * 100 + original / 2) / original
        let pct = (saved * 100 + original.0 as i128 / 2) / original.0 as i128;
        Some(pct as u32)
    }

    /// Formats the amount with the given currency symbol.
    ///
    /// Digits are grouped in threes with a space, the way the storefront
    /// prints prices: `89 990 ₽`.
    pub fn format_with(&self, symbol: &str) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{} {}", sign, grouped, symbol)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Money(units)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(89990);
        assert_eq!(money.units(), 89990);
        assert!(money.is_positive());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_units(i64::MAX);
        assert_eq!(max.multiply_quantity(2), max);
        assert_eq!(max + Money::from_units(1), max);
        assert_eq!(
            Money::from_units(i64::MIN) - Money::from_units(1),
            Money::from_units(i64::MIN)
        );

        let total: Money = [max, max, Money::from_units(10)].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_units(89990).to_string(), "89 990 ₽");
        assert_eq!(Money::from_units(500).to_string(), "500 ₽");
        assert_eq!(Money::from_units(1234567).to_string(), "1 234 567 ₽");
        assert_eq!(Money::from_units(-2500).to_string(), "-2 500 ₽");
        assert_eq!(Money::zero().to_string(), "0 ₽");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_units(12990).format_with("RUB"), "12 990 RUB");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_units(100);
        assert_eq!(c.units(), 1400);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1000, 1000, 500].into_iter().map(Money::from_units).sum();
        assert_eq!(total.units(), 2500);
    }

    #[test]
    fn test_discount_percent() {
        let old = Money::from_units(29990);
        assert_eq!(Money::from_units(24990).discount_percent_from(old), Some(17));
        assert_eq!(Money::from_units(8990).discount_percent_from(Money::from_units(11990)), Some(25));

        // Not a markdown
        assert_eq!(Money::from_units(100).discount_percent_from(Money::from_units(100)), None);
        assert_eq!(Money::from_units(100).discount_percent_from(Money::zero()), None);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_units(2500)).unwrap();
        assert_eq!(json, "2500");
        assert_eq!(Money::inline(), "number");
    }
}
