//! Income calculation across promo and base rates.
//!
//! Every entry point here is a pure function of the deposit snapshot, the
//! period length and an explicit reference date. Bad input never fails: a
//! non-positive principal or period earns zero, an unparseable date reads as
//! absent.

use accrue_core::types::{Date, Deposit};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::convention::AccrualConvention;
use crate::promo::check_promo_status;

/// Income over a period, split into its promo-rate and base-rate parts.
///
/// When the promo window ends inside the period, `base_income` is earned on
/// the principal *plus* `promo_income`, so interest compounds through the
/// rate change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IncomeBreakdown {
    /// Days accrued at the promotional rate.
    pub promo_days: i64,
    /// Income earned at the promotional rate.
    pub promo_income: Decimal,
    /// Days accrued at the base rate.
    pub base_days: i64,
    /// Income earned at the base rate.
    pub base_income: Decimal,
}

impl IncomeBreakdown {
    /// Total income over the period.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.promo_income
            .checked_add(self.base_income)
            .unwrap_or(Decimal::ZERO)
    }

    /// True when the period crosses the promo end date.
    #[must_use]
    pub fn is_transition(&self) -> bool {
        self.promo_days > 0 && self.base_days > 0
    }
}

/// Income earned by `deposit` over the next `days` days, in major units.
///
/// The promo window is evaluated as of `as_of`, except when a term deposit is
/// projected over exactly its whole term: then it is evaluated as of the
/// deposit's start date, so the answer does not depend on when it is asked.
///
/// The result is unrounded; convert with
/// [`Money::from_major_rounded`](accrue_core::types::Money::from_major_rounded)
/// when booking it.
///
/// # Example
///
/// ```rust
/// use accrue_core::prelude::*;
/// use accrue_engine::calculate_income;
/// use rust_decimal_macros::dec;
///
/// let deposit = Deposit::new("d1", "Cushion", "Alfa", Money::from_minor(100_000), Rate::from_percent(dec!(12)))
///     .with_capitalization("end");
/// let income = calculate_income(&deposit, 365, Date::parse("2025-01-01").unwrap());
/// assert_eq!(income, dec!(120));
/// ```
#[must_use]
pub fn calculate_income(deposit: &Deposit, days: i64, as_of: Date) -> Decimal {
    income_breakdown(deposit, days, as_of).total()
}

/// Same as [`calculate_income`], keeping the promo and base parts apart.
#[must_use]
pub fn income_breakdown(deposit: &Deposit, days: i64, as_of: Date) -> IncomeBreakdown {
    if !deposit.amount.is_positive() || days <= 0 {
        return IncomeBreakdown::default();
    }

    let anchor = whole_term_start(deposit, days).unwrap_or(as_of);
    breakdown_from(deposit, days, anchor)
}

/// Income of a term deposit over its whole term, from start date to end date.
///
/// Zero for savings deposits, for missing or unparseable dates and for a
/// non-positive span.
#[must_use]
pub fn total_term_income(deposit: &Deposit) -> Decimal {
    if !deposit.is_term() {
        return Decimal::ZERO;
    }
    match (deposit.start(), deposit.term_days()) {
        (Some(start), Some(days)) if days > 0 => calculate_income(deposit, days, start),
        _ => Decimal::ZERO,
    }
}

/// Start date of a term deposit when `days` spans its whole term.
fn whole_term_start(deposit: &Deposit, days: i64) -> Option<Date> {
    if !deposit.is_term() || deposit.term_days()? != days {
        return None;
    }
    deposit.start()
}

fn breakdown_from(deposit: &Deposit, days: i64, anchor: Date) -> IncomeBreakdown {
    let convention = AccrualConvention::for_deposit(deposit);
    let principal = deposit.amount.to_major();
    let status = check_promo_status(deposit, anchor);

    match deposit.promo_rate.filter(|_| status.active) {
        Some(promo_rate) if days > status.days_remaining => {
            let promo_days = status.days_remaining;
            let promo_income = convention.income(principal, promo_rate, promo_days);
            let base_days = days - promo_days;
            let base_income = principal
                .checked_add(promo_income)
                .map_or(Decimal::ZERO, |grown| {
                    convention.income(grown, deposit.interest_rate, base_days)
                });
            IncomeBreakdown {
                promo_days,
                promo_income,
                base_days,
                base_income,
            }
        }
        Some(promo_rate) => IncomeBreakdown {
            promo_days: days,
            promo_income: convention.income(principal, promo_rate, days),
            ..IncomeBreakdown::default()
        },
        None => IncomeBreakdown {
            base_days: days,
            base_income: convention.income(principal, deposit.interest_rate, days),
            ..IncomeBreakdown::default()
        },
    }
}
