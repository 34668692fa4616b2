//! Fixed-point money amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::{AccrueError, AccrueResult};

/// Number of minor units per major unit (kopecks per ruble, cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

/// A money amount held as an integer count of minor units.
///
/// Stored amounts never pass through binary floating point. Engine results are
/// full-precision [`Decimal`]s and are brought back into `Money` with
/// [`Money::from_major_rounded`], the single rounding point.
///
/// # Example
///
/// ```rust
/// use accrue_core::types::Money;
/// use rust_decimal_macros::dec;
///
/// let income = Money::from_major_rounded(dec!(12.345)).unwrap();
/// assert_eq!(income.minor(), 1235);
/// assert_eq!(income.to_string(), "12.35");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the amount in major units as an exact decimal.
    #[must_use]
    pub fn to_major(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Converts a major-unit decimal into minor units, rounding half up
    /// (midpoint away from zero).
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::MathError` if the value does not fit in `i64` minor units.
    pub fn from_major_rounded(major: Decimal) -> AccrueResult<Self> {
        let minor = major
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .ok_or_else(|| AccrueError::math_error(format!("{major} overflows minor units")))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        minor
            .to_i64()
            .map(Money)
            .ok_or_else(|| AccrueError::math_error(format!("{major} overflows minor units")))
    }

    /// Parses a major-unit amount such as `"1500"`, `"1500.50"` or `"1500,50"`.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidAmount` for malformed input or more than
    /// two fractional digits.
    pub fn parse_major(s: &str) -> AccrueResult<Self> {
        let normalized = s.trim().replace(',', ".");
        let value = Decimal::from_str(&normalized)
            .map_err(|e| AccrueError::invalid_amount(format!("{s:?}: {e}")))?;
        if value.normalize().scale() > 2 {
            return Err(AccrueError::invalid_amount(format!(
                "{s:?}: at most two fractional digits"
            )));
        }
        Self::from_major_rounded(value)
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_major())
    }
}

impl FromStr for Money {
    type Err = AccrueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_major(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_major_conversion() {
        assert_eq!(Money::from_minor(100_000).to_major(), dec!(1000.00));
        assert_eq!(Money::from_minor(5).to_major(), dec!(0.05));
        assert_eq!(Money::ZERO.to_major(), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(Money::from_major_rounded(dec!(0.005)).unwrap().minor(), 1);
        assert_eq!(Money::from_major_rounded(dec!(0.0049)).unwrap().minor(), 0);
        assert_eq!(Money::from_major_rounded(dec!(0.015)).unwrap().minor(), 2);
        assert_eq!(Money::from_major_rounded(dec!(0.025)).unwrap().minor(), 3);
        assert_eq!(Money::from_major_rounded(dec!(-0.005)).unwrap().minor(), -1);
    }

    #[test]
    fn test_parse_major() {
        assert_eq!(Money::parse_major("1500").unwrap().minor(), 150_000);
        assert_eq!(Money::parse_major("1500.5").unwrap().minor(), 150_050);
        assert_eq!(Money::parse_major("1500,50").unwrap().minor(), 150_050);
        assert_eq!(" 10.00 ".parse::<Money>().unwrap().minor(), 1_000);

        assert!(Money::parse_major("ten").is_err());
        assert!(Money::parse_major("1.005").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_minor(7).to_string(), "0.07");
    }

    #[test]
    fn test_sum_and_add() {
        let total: Money = [1, 2, 3].into_iter().map(Money::from_minor).sum();
        assert_eq!(total, Money::from_minor(6));

        let mut m = Money::from_minor(10);
        m += Money::from_minor(5);
        assert_eq!(m.minor(), 15);
        assert_eq!(Money::from_minor(i64::MAX).checked_add(Money::from_minor(1)), None);
    }

    #[test]
    fn test_serde_is_minor_units() {
        let json = serde_json::to_string(&Money::from_minor(100_000)).unwrap();
        assert_eq!(json, "100000");
        let parsed: Money = serde_json::from_str("4250").unwrap();
        assert_eq!(parsed, Money::from_minor(4250));
    }
}
