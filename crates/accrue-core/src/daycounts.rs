//! Day count conventions for deposit interest.
//!
//! A convention fixes how many days make up a year when a nominal annual rate
//! is turned into a per-day rate or a simple-interest fraction.
//!
//! # Usage
//!
//! ```rust
//! use accrue_core::daycounts::DayCountConvention;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(DayCountConvention::Act360.basis(), 360);
//! assert_eq!(DayCountConvention::Act360.fraction_of_days(90), dec!(0.25));
//! ```

use rust_decimal::Decimal;

/// Enumeration of the supported day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/360, a 360-day year.
    Act360,

    /// Actual/365 Fixed, the default for retail deposits.
    #[default]
    Act365Fixed,
}

impl DayCountConvention {
    /// Returns the name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
        }
    }

    /// Returns the year basis (number of days per year).
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Act360 => 360,
            DayCountConvention::Act365Fixed => 365,
        }
    }

    /// Converts a plain day count into a fraction of a year.
    #[must_use]
    pub fn fraction_of_days(&self, days: i64) -> Decimal {
        Decimal::from(days) / Decimal::from(self.basis())
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_basis() {
        assert_eq!(DayCountConvention::Act360.basis(), 360);
        assert_eq!(DayCountConvention::Act365Fixed.basis(), 365);
    }

    #[test]
    fn test_fraction_of_days() {
        assert_eq!(DayCountConvention::Act365Fixed.fraction_of_days(365), Decimal::ONE);
        assert_eq!(DayCountConvention::Act360.fraction_of_days(90), dec!(0.25));
        assert_eq!(DayCountConvention::Act365Fixed.fraction_of_days(0), Decimal::ZERO);
    }
}
