//! # Accrue Engine
//!
//! Interest calculation for savings and term deposits.
//!
//! The engine turns a [`Deposit`](accrue_core::Deposit) snapshot, a period in
//! days and an explicit reference date into income:
//!
//! - **Conventions**: simple, daily-compound and monthly-compound accrual on
//!   ACT/365F, with per-bank overrides to ACT/360
//! - **Promo windows**: a promotional rate that applies up to and including
//!   its end date, then hands over to the base rate
//! - **Schedules**: maturity, top-up windows, expiry and prolongation
//! - **Accruals**: daily payouts and income projections
//!
//! Nothing here reads the system clock; callers pass `as_of`.
//!
//! ## Example
//!
//! ```rust
//! use accrue_core::prelude::*;
//! use accrue_engine::{calculate_income, check_promo_status};
//! use rust_decimal_macros::dec;
//!
//! let as_of = Date::parse("2025-03-01").unwrap();
//! let deposit = Deposit::new("d1", "Cushion", "Alfa", Money::from_minor(100_000), Rate::from_percent(dec!(12)))
//!     .with_capitalization("end")
//!     .with_promo(Rate::from_percent(dec!(17)), "2025-03-05");
//!
//! assert_eq!(check_promo_status(&deposit, as_of).days_remaining, 5);
//! assert!(calculate_income(&deposit, 10, as_of) > dec!(3.28));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod accrual;
pub mod convention;
pub mod income;
pub mod promo;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::accrual::{
        daily_accrual, plan_accruals, project_income, Accrual, AccrualKind, AccrualOutcome,
        AccrualRun, Projection,
    };
    pub use crate::convention::{AccrualConvention, AccrualMethod};
    pub use crate::income::{calculate_income, income_breakdown, total_term_income, IncomeBreakdown};
    pub use crate::promo::{check_promo_status, PromoStatus};
    pub use crate::schedule::{
        can_be_prolonged, days_until, is_expired, maturity_date, top_up_end_date,
        ProlongationPolicy,
    };
}

pub use accrual::{
    daily_accrual, plan_accruals, project_income, AccrualKind, AccrualRun, Projection,
};
pub use convention::{AccrualConvention, AccrualMethod};
pub use income::{calculate_income, income_breakdown, total_term_income, IncomeBreakdown};
pub use promo::{check_promo_status, PromoStatus};
pub use schedule::{
    can_be_prolonged, days_until, is_expired, maturity_date, top_up_end_date, ProlongationPolicy,
};
