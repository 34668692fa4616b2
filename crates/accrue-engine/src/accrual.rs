//! Accrual planning and income projections.
//!
//! These functions decide *what* should be booked; writing the ledger and
//! updating the deposit book is left to the caller.

use accrue_core::error::{AccrueError, AccrueResult};
use accrue_core::types::{Date, Deposit, DepositKind, Money, Rate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::income::{income_breakdown, total_term_income, IncomeBreakdown};
use crate::schedule::is_expired;

/// Ledger description of a daily interest payout.
pub const DAILY_INTEREST_DESCRIPTION: &str = "Daily interest payout";

/// Ledger description of the interest a term deposit pays at maturity.
pub const MATURITY_INTEREST_DESCRIPTION: &str = "Interest payout at end of term";

/// What an accrual pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccrualKind {
    /// One day of savings interest.
    Daily,
    /// Whole-term interest of a matured term deposit, paid once.
    Maturity,
}

/// Interest to be credited to one deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accrual {
    /// Deposit receiving the interest.
    pub deposit_id: String,
    /// Deposit display name.
    pub deposit_name: String,
    /// Unrounded income in major units.
    pub income: Decimal,
    /// Income rounded half up to minor units; the amount to book.
    pub amount: Money,
    /// Ledger description.
    pub description: String,
    /// Daily or maturity payout.
    pub kind: AccrualKind,
}

/// Interest due to `deposit` on `as_of`.
///
/// Savings deposits earn one day of income. A term deposit earns nothing
/// while it runs; once `as_of` is past its end date it is paid its whole-term
/// income, unless `maturity_paid_on` shows that payout was already booked.
/// Income that rounds to zero minor units returns `None`.
///
/// # Errors
///
/// Returns `AccrueError::MathError` if the income does not fit in minor units.
pub fn daily_accrual(deposit: &Deposit, as_of: Date) -> AccrueResult<Option<Accrual>> {
    let (income, kind) = match deposit.kind {
        DepositKind::Savings => (income_breakdown(deposit, 1, as_of).total(), AccrualKind::Daily),
        DepositKind::Term if is_expired(deposit, as_of) && deposit.maturity_paid_on.is_none() => {
            (total_term_income(deposit), AccrualKind::Maturity)
        }
        DepositKind::Term => return Ok(None),
    };

    let amount = Money::from_major_rounded(income)?;
    if !amount.is_positive() {
        log::debug!("deposit {}: {kind:?} income {income} rounds to zero", deposit.id);
        return Ok(None);
    }

    let description = match kind {
        AccrualKind::Daily => DAILY_INTEREST_DESCRIPTION,
        AccrualKind::Maturity => MATURITY_INTEREST_DESCRIPTION,
    };
    Ok(Some(Accrual {
        deposit_id: deposit.id.clone(),
        deposit_name: deposit.name.clone(),
        income,
        amount,
        description: description.to_string(),
        kind,
    }))
}

/// Result of planning a daily accrual for one deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccrualOutcome {
    /// Interest is due.
    Accrued(Accrual),
    /// Nothing to book (running or already paid term deposit, or zero income).
    Skipped {
        /// Deposit identifier.
        deposit_id: String,
    },
    /// Income could not be converted to minor units.
    Failed {
        /// Deposit identifier.
        deposit_id: String,
        /// Underlying error.
        error: AccrueError,
    },
}

/// Daily accrual plan over a deposit book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualRun {
    /// Reference date of the run.
    pub as_of: Date,
    /// One outcome per deposit, in book order.
    pub outcomes: Vec<AccrualOutcome>,
}

impl AccrualRun {
    /// Accruals to book.
    pub fn accruals(&self) -> impl Iterator<Item = &Accrual> {
        self.outcomes.iter().filter_map(|o| match o {
            AccrualOutcome::Accrued(accrual) => Some(accrual),
            _ => None,
        })
    }

    /// Sum of all accrued amounts.
    #[must_use]
    pub fn total(&self) -> Money {
        self.accruals().map(|a| a.amount).sum()
    }

    /// Number of deposits with interest due.
    #[must_use]
    pub fn accrued_count(&self) -> usize {
        self.accruals().count()
    }

    /// Number of deposits that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, AccrualOutcome::Failed { .. }))
            .count()
    }

    /// True when no deposit failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Plans the interest due to every deposit on `as_of`.
#[must_use]
pub fn plan_accruals<'a, I>(deposits: I, as_of: Date) -> AccrualRun
where
    I: IntoIterator<Item = &'a Deposit>,
{
    let outcomes = deposits
        .into_iter()
        .map(|deposit| match daily_accrual(deposit, as_of) {
            Ok(Some(accrual)) => AccrualOutcome::Accrued(accrual),
            Ok(None) => AccrualOutcome::Skipped {
                deposit_id: deposit.id.clone(),
            },
            Err(error) => AccrualOutcome::Failed {
                deposit_id: deposit.id.clone(),
                error,
            },
        })
        .collect();

    AccrualRun { as_of, outcomes }
}

/// Projected income of a deposit over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Deposit identifier.
    pub deposit_id: String,
    /// Deposit display name.
    pub deposit_name: String,
    /// Current principal.
    pub principal: Money,
    /// Base annual rate.
    pub interest_rate: Rate,
    /// Period length in days.
    pub days: i64,
    /// Unrounded income in major units.
    pub income: Decimal,
    /// Principal plus income in major units.
    pub total: Decimal,
    /// Promo/base split of the income.
    pub breakdown: IncomeBreakdown,
}

/// Projects the income of `deposit` over the next `days` days.
///
/// # Errors
///
/// Returns `AccrueError::InvalidPeriod` when `days <= 0`.
pub fn project_income(deposit: &Deposit, days: i64, as_of: Date) -> AccrueResult<Projection> {
    if days <= 0 {
        return Err(AccrueError::InvalidPeriod { days });
    }

    let breakdown = income_breakdown(deposit, days, as_of);
    let income = breakdown.total();
    let total = deposit
        .amount
        .to_major()
        .checked_add(income)
        .ok_or_else(|| AccrueError::math_error(format!("{} + {income} overflows", deposit.amount)))?;
    Ok(Projection {
        deposit_id: deposit.id.clone(),
        deposit_name: deposit.name.clone(),
        principal: deposit.amount,
        interest_rate: deposit.interest_rate,
        days,
        income,
        total,
        breakdown,
    })
}
