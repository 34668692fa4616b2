//! Accrual conventions.
//!
//! A convention is the pair (capitalization method, year basis) a bank applies
//! when it turns an annual rate and a number of elapsed days into income. The
//! declared policy of a deposit normally selects it; some banks override the
//! declared policy entirely.

use accrue_core::daycounts::DayCountConvention;
use accrue_core::types::{Capitalization, Deposit, Rate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// Average month length used to turn days into whole compounding months.
pub const AVERAGE_MONTH_DAYS: Decimal = dec!(30.44);

/// Bank identifiers that always compound daily on a 360-day year.
pub const FIXED_360_BANKS: &[&str] = &["Yandex", "Яндекс Банк"];

/// How interest is turned into income over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccrualMethod {
    /// Simple interest, `P * R * days / basis`.
    Simple,
    /// Compounded once per day, `P * ((1 + R / basis)^days - 1)`.
    DailyCompound,
    /// Compounded once per whole average month, `P * ((1 + R / 12)^months - 1)`.
    ///
    /// Periods shorter than one average month accrue nothing.
    MonthlyCompound,
}

/// A capitalization method together with its year basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualConvention {
    method: AccrualMethod,
    day_count: DayCountConvention,
}

impl AccrualConvention {
    /// Simple interest on ACT/365F; the fallback for unknown policies.
    pub const SIMPLE_365: Self = Self::new(AccrualMethod::Simple, DayCountConvention::Act365Fixed);

    /// Creates a convention.
    #[must_use]
    pub const fn new(method: AccrualMethod, day_count: DayCountConvention) -> Self {
        Self { method, day_count }
    }

    /// Resolves the convention a deposit accrues under.
    ///
    /// Banks listed in [`FIXED_360_BANKS`] ignore the declared policy and
    /// compound daily on ACT/360. Quarterly and unrecognised policies fall back
    /// to simple interest.
    #[must_use]
    pub fn for_deposit(deposit: &Deposit) -> Self {
        if is_fixed_360_bank(&deposit.bank) {
            return Self::new(AccrualMethod::DailyCompound, DayCountConvention::Act360);
        }

        match &deposit.capitalization {
            Capitalization::Daily => {
                Self::new(AccrualMethod::DailyCompound, DayCountConvention::Act365Fixed)
            }
            Capitalization::Monthly => {
                Self::new(AccrualMethod::MonthlyCompound, DayCountConvention::Act365Fixed)
            }
            Capitalization::End => Self::SIMPLE_365,
            other => {
                log::debug!(
                    "deposit {}: capitalization {other:?} priced as simple interest",
                    deposit.id
                );
                Self::SIMPLE_365
            }
        }
    }

    /// Returns the capitalization method.
    #[must_use]
    pub fn method(&self) -> AccrualMethod {
        self.method
    }

    /// Returns the year basis convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Income earned by `principal` (major units) at `rate` over `days`.
    ///
    /// Non-positive principal or days earn nothing.
    #[must_use]
    pub fn income(&self, principal: Decimal, rate: Rate, days: i64) -> Decimal {
        if principal <= Decimal::ZERO || days <= 0 {
            return Decimal::ZERO;
        }

        match self.method {
            AccrualMethod::Simple => simple_interest(principal, rate, days, self.day_count),
            AccrualMethod::DailyCompound => {
                daily_compound_interest(principal, rate, days, self.day_count)
            }
            AccrualMethod::MonthlyCompound => monthly_compound_interest(principal, rate, days),
        }
    }
}

/// Returns true when the bank compounds daily on a 360-day year regardless of policy.
#[must_use]
pub fn is_fixed_360_bank(bank: &str) -> bool {
    let bank = bank.trim();
    FIXED_360_BANKS.iter().any(|b| b.eq_ignore_ascii_case(bank))
}

/// Simple (end-of-term) interest: `P * R/100 * days / basis`.
#[must_use]
pub fn simple_interest(
    principal: Decimal,
    rate: Rate,
    days: i64,
    day_count: DayCountConvention,
) -> Decimal {
    principal
        .checked_mul(rate.percent() / Decimal::ONE_HUNDRED)
        .and_then(|annual| annual.checked_mul(day_count.fraction_of_days(days)))
        .unwrap_or_else(|| overflowed(days))
}

/// Daily compounding: `P * ((1 + R/100/basis)^days - 1)`.
#[must_use]
pub fn daily_compound_interest(
    principal: Decimal,
    rate: Rate,
    days: i64,
    day_count: DayCountConvention,
) -> Decimal {
    let daily_rate = rate.as_fraction() / Decimal::from(day_count.basis());
    compound(principal, daily_rate, days)
}

/// Monthly compounding over `trunc(days / 30.44)` whole months.
#[must_use]
pub fn monthly_compound_interest(principal: Decimal, rate: Rate, days: i64) -> Decimal {
    let months = whole_months(days);
    if months == 0 {
        return Decimal::ZERO;
    }
    let monthly_rate = rate.as_fraction() / Decimal::from(12);
    compound(principal, monthly_rate, months)
}

/// Number of whole average months in `days`.
#[must_use]
pub fn whole_months(days: i64) -> i64 {
    if days <= 0 {
        return 0;
    }
    (Decimal::from(days) / AVERAGE_MONTH_DAYS)
        .trunc()
        .to_i64()
        .unwrap_or(0)
}

fn compound(principal: Decimal, period_rate: Decimal, periods: i64) -> Decimal {
    (Decimal::ONE + period_rate)
        .checked_powi(periods)
        .and_then(|factor| principal.checked_mul(factor - Decimal::ONE))
        .unwrap_or_else(|| overflowed(periods))
}

fn overflowed(periods: i64) -> Decimal {
    log::warn!("income over {periods} periods overflows; income set to zero");
    Decimal::ZERO
}
