//! Promotional-rate windows.

use accrue_core::types::{Date, Deposit};
use serde::Serialize;

/// Whether a promotional rate applies on a given date, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PromoStatus {
    /// True while the promotional rate applies.
    pub active: bool,
    /// Days the promotional rate still applies, counting the reference day
    /// and the promo end date itself. Zero when inactive.
    pub days_remaining: i64,
}

impl PromoStatus {
    /// No promotional rate applies.
    pub const INACTIVE: Self = Self {
        active: false,
        days_remaining: 0,
    };
}

/// Checks the promotional-rate window of `deposit` as of `as_of`.
///
/// The promo is active when a promo rate and a parseable promo end date are
/// both set and `as_of` is on or before the end date. A missing, empty or
/// malformed end date reads as "no promo".
///
/// # Example
///
/// ```rust
/// use accrue_core::prelude::*;
/// use accrue_engine::check_promo_status;
/// use rust_decimal_macros::dec;
///
/// let deposit = Deposit::new("d1", "Promo", "Alfa", Money::from_minor(100_000), Rate::from_percent(dec!(12)))
///     .with_promo(Rate::from_percent(dec!(17)), "2025-03-05");
///
/// let status = check_promo_status(&deposit, Date::parse("2025-03-01").unwrap());
/// assert!(status.active);
/// assert_eq!(status.days_remaining, 5);
/// ```
#[must_use]
pub fn check_promo_status(deposit: &Deposit, as_of: Date) -> PromoStatus {
    let Some((_, promo_end)) = deposit.promo() else {
        return PromoStatus::INACTIVE;
    };

    let days_remaining = as_of.days_between(&promo_end) + 1;
    if days_remaining > 0 {
        PromoStatus {
            active: true,
            days_remaining,
        }
    } else {
        PromoStatus::INACTIVE
    }
}
