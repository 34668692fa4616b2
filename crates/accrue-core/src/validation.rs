//! Creation-time validation of deposit records.
//!
//! The interest engine trusts its input and degrades silently on bad dates.
//! Everything a user can get wrong when entering a deposit is caught here
//! instead, before the record reaches the deposit book.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::error::{AccrueError, AccrueResult};
use crate::types::{Capitalization, Date, Deposit, DepositKind, Money};

/// Banks a deposit may be opened with, in both spellings used by the book.
pub const DEFAULT_BANKS: &[&str] = &[
    "Яндекс Банк",
    "Yandex",
    "Альфа Банк",
    "Alfa",
    "Тинькофф",
    "Tinkoff",
    "Сбербанк",
    "Sberbank",
    "ВТБ",
    "VTB",
];

const MAX_NAME_LEN: usize = 100;
const MAX_TERM_MONTHS: u32 = 60;

/// Validator for new and edited deposit records.
///
/// Every rule is checked and all violations are reported together.
///
/// # Example
///
/// ```rust
/// use accrue_core::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let deposit = Deposit::new("d1", "", "Yandex", Money::from_minor(100_000), Rate::from_percent(dec!(12)))
///     .with_start("2025-01-01");
/// let err = DepositValidator::default().validate(&deposit).unwrap_err();
/// assert!(err.to_string().contains("name cannot be empty"));
/// ```
#[derive(Debug, Clone)]
pub struct DepositValidator {
    allowed_banks: BTreeSet<String>,
    min_amount: Money,
    max_amount: Money,
}

impl Default for DepositValidator {
    fn default() -> Self {
        Self {
            allowed_banks: DEFAULT_BANKS.iter().map(|b| (*b).to_string()).collect(),
            min_amount: Money::from_minor(1_000),
            max_amount: Money::from_minor(100_000_000),
        }
    }
}

impl DepositValidator {
    /// Creates a validator with the default bank list and amount limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bank to the allowed list.
    #[must_use]
    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.allowed_banks.insert(bank.into());
        self
    }

    /// Overrides the accepted principal range.
    #[must_use]
    pub fn with_amount_limits(mut self, min: Money, max: Money) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Validates a deposit record.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::Validation` listing every violated rule.
    pub fn validate(&self, deposit: &Deposit) -> AccrueResult<()> {
        let mut reasons = Vec::new();

        self.check_basic_fields(deposit, &mut reasons);
        self.check_financial_fields(deposit, &mut reasons);
        Self::check_dates(deposit, &mut reasons);
        Self::check_business_rules(deposit, &mut reasons);

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(AccrueError::Validation { reasons })
        }
    }

    fn check_basic_fields(&self, deposit: &Deposit, reasons: &mut Vec<String>) {
        if deposit.name.trim().is_empty() {
            reasons.push("deposit name cannot be empty".into());
        }
        if deposit.name.chars().count() > MAX_NAME_LEN {
            reasons.push(format!("deposit name too long (max {MAX_NAME_LEN} characters)"));
        }
        if !self.allowed_banks.contains(&deposit.bank) {
            let allowed: Vec<&str> = self.allowed_banks.iter().map(String::as_str).collect();
            reasons.push(format!(
                "invalid bank: {}. Allowed banks: {}",
                deposit.bank,
                allowed.join(", ")
            ));
        }
        if let Capitalization::Unrecognized(value) = &deposit.capitalization {
            reasons.push(
                AccrueError::UnsupportedCapitalization {
                    value: value.clone(),
                }
                .to_string(),
            );
        }
    }

    fn check_financial_fields(&self, deposit: &Deposit, reasons: &mut Vec<String>) {
        if deposit.amount < self.min_amount {
            reasons.push(format!("amount below minimum: {}", self.min_amount));
        }
        if deposit.amount > self.max_amount {
            reasons.push(format!("amount above maximum: {}", self.max_amount));
        }

        let hundred = Decimal::ONE_HUNDRED;
        let base = deposit.interest_rate.percent();
        if base <= Decimal::ZERO {
            reasons.push("interest rate must be positive".into());
        }
        if base > hundred {
            reasons.push("interest rate cannot exceed 100%".into());
        }

        if let Some(promo) = deposit.promo_rate {
            let promo = promo.percent();
            if promo <= Decimal::ZERO {
                reasons.push("promo rate must be positive if set".into());
            }
            if promo > hundred {
                reasons.push("promo rate cannot exceed 100%".into());
            }
            if promo <= base {
                reasons.push("promo rate must be higher than base rate".into());
            }
        }
    }

    fn check_dates(deposit: &Deposit, reasons: &mut Vec<String>) {
        let start = strict_date(deposit.start_date.as_deref(), "start date", reasons);

        if let Some(raw) = non_empty(deposit.promo_end_date.as_deref()) {
            if let Some(promo_end) = strict_date(Some(raw), "promo end date", reasons) {
                if start.is_some_and(|s| promo_end < s) {
                    reasons.push("promo end date cannot be before start date".into());
                }
            }
        }

        if deposit.kind == DepositKind::Term {
            match non_empty(deposit.end_date.as_deref()) {
                None => reasons.push("term deposit must have end date".into()),
                Some(raw) => {
                    if let Some(end) = strict_date(Some(raw), "end date", reasons) {
                        if start.is_some_and(|s| end <= s) {
                            reasons.push("end date must be after start date".into());
                        }
                    }
                }
            }
        }
    }

    fn check_business_rules(deposit: &Deposit, reasons: &mut Vec<String>) {
        if deposit.kind == DepositKind::Term {
            match deposit.term_months {
                None | Some(0) => {
                    reasons.push("term deposits must have positive term in months".into());
                }
                Some(months) if months > MAX_TERM_MONTHS => {
                    reasons.push(format!(
                        "term cannot exceed {MAX_TERM_MONTHS} months (5 years)"
                    ));
                }
                Some(_) => {}
            }
        }

        let has_promo_end = non_empty(deposit.promo_end_date.as_deref()).is_some();
        if deposit.promo_rate.is_some() && !has_promo_end {
            reasons.push("promo rate requires promo end date".into());
        }
        if has_promo_end && deposit.promo_rate.is_none() {
            reasons.push("promo end date requires promo rate".into());
        }

        if deposit.initial_amount > deposit.amount {
            reasons.push("current amount cannot be less than initial amount".into());
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn strict_date(raw: Option<&str>, field: &str, reasons: &mut Vec<String>) -> Option<Date> {
    let raw = raw.unwrap_or_default();
    match Date::parse(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            reasons.push(format!("invalid {field} format: {raw:?} ({err})"));
            None
        }
    }
}
