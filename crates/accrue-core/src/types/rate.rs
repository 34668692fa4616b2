//! Annual interest rate type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An annual interest rate quoted in percent (17.0 means 17% per year).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from a percentage value.
    #[must_use]
    pub const fn from_percent(percent: Decimal) -> Self {
        Rate(percent)
    }

    /// Returns the rate as a percentage.
    #[must_use]
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (percent / 100).
    #[must_use]
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns true if the rate is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
