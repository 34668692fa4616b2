//! Calendar helpers for deposit lifecycles: maturity, top-up window,
//! expiry and prolongation.

use accrue_core::error::AccrueResult;
use accrue_core::types::{Date, Deposit};
use serde::{Deserialize, Serialize};

/// Day count reported for a date that is missing or does not parse.
pub const UNKNOWN_DAYS: i64 = 999;

/// Days after opening during which top-ups are accepted.
pub const TOP_UP_WINDOW_DAYS: i64 = 7;

/// Maturity date of a deposit opened on `start_date` for `term_months` months.
///
/// Months are calendar months; the day is clamped to the end of a shorter month.
///
/// # Errors
///
/// Returns `AccrueError::InvalidDate` if `start_date` is not a `YYYY-MM-DD` date.
///
/// # Example
///
/// ```rust
/// use accrue_engine::maturity_date;
///
/// assert_eq!(maturity_date("2025-08-31", 6).unwrap().to_string(), "2026-02-28");
/// assert!(maturity_date("31.08.2025", 6).is_err());
/// ```
pub fn maturity_date(start_date: &str, term_months: u32) -> AccrueResult<Date> {
    let start = Date::parse(start_date)?;
    let months = i32::try_from(term_months).unwrap_or(i32::MAX);
    start.add_months(months)
}

/// Last day top-ups are accepted for a deposit opened on `start_date`.
///
/// An unparseable start date counts from `as_of`.
#[must_use]
pub fn top_up_end_date(start_date: &str, as_of: Date) -> Date {
    let start = Date::parse(start_date).unwrap_or(as_of);
    start.add_days(TOP_UP_WINDOW_DAYS)
}

/// True once `as_of` is past the deposit's end date.
///
/// Deposits without a parseable end date never expire.
#[must_use]
pub fn is_expired(deposit: &Deposit, as_of: Date) -> bool {
    deposit.end().is_some_and(|end| as_of > end)
}

/// Days from `as_of` until `date`; [`UNKNOWN_DAYS`] when the date is missing or malformed.
#[must_use]
pub fn days_until(date: Option<&str>, as_of: Date) -> i64 {
    Date::parse_lenient(date, "date").map_or(UNKNOWN_DAYS, |d| as_of.days_between(&d))
}

/// When a term deposit may be prolonged relative to its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProlongationPolicy {
    /// How many days before the end date prolongation opens.
    #[serde(default = "default_lead_days")]
    pub lead_days: i64,
    /// How many days after the end date prolongation stays open.
    /// `None` keeps it open indefinitely.
    #[serde(default)]
    pub grace_days: Option<i64>,
}

fn default_lead_days() -> i64 {
    7
}

impl Default for ProlongationPolicy {
    fn default() -> Self {
        Self {
            lead_days: default_lead_days(),
            grace_days: None,
        }
    }
}

impl ProlongationPolicy {
    /// Bounds eligibility to `grace_days` after the end date.
    #[must_use]
    pub fn with_grace_days(mut self, grace_days: i64) -> Self {
        self.grace_days = Some(grace_days);
        self
    }

    /// True when `deposit` may be prolonged on `as_of` under this policy.
    ///
    /// Only term deposits with a parseable end date qualify.
    #[must_use]
    pub fn allows(&self, deposit: &Deposit, as_of: Date) -> bool {
        if !deposit.is_term() {
            return false;
        }
        let Some(end) = deposit.end() else {
            return false;
        };

        let days_until_end = as_of.days_between(&end);
        days_until_end <= self.lead_days && self.grace_days.map_or(true, |g| days_until_end >= -g)
    }
}

/// True for term deposits ending within seven days of `as_of`, or already ended.
///
/// Uses the default [`ProlongationPolicy`], which never closes after expiry.
#[must_use]
pub fn can_be_prolonged(deposit: &Deposit, as_of: Date) -> bool {
    ProlongationPolicy::default().allows(deposit, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::types::{Money, Rate};
    use rust_decimal_macros::dec;

    fn day(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn term_ending(end: &str) -> Deposit {
        Deposit::new("t", "Term", "Alfa", Money::from_minor(100_000), Rate::from_percent(dec!(15)))
            .with_term("2025-01-01", end)
    }

    #[test]
    fn test_maturity_date() {
        assert_eq!(maturity_date("2025-01-15", 6).unwrap(), day("2025-07-15"));
        assert_eq!(maturity_date("2025-01-31", 1).unwrap(), day("2025-02-28"));
        assert_eq!(maturity_date("2025-03-10", 0).unwrap(), day("2025-03-10"));
        assert_eq!(maturity_date("2024-02-29", 12).unwrap(), day("2025-02-28"));
    }

    #[test]
    fn test_maturity_date_rejects_bad_start() {
        let err = maturity_date("2025/01/15", 6).unwrap_err();
        assert!(err.is_date_format());
    }

    #[test]
    fn test_maturity_date_beyond_calendar() {
        let err = maturity_date("2025-01-01", u32::MAX).unwrap_err();
        assert!(err.is_date_format());
    }

    #[test]
    fn test_top_up_end_date() {
        let as_of = day("2025-06-01");
        assert_eq!(top_up_end_date("2025-05-20", as_of), day("2025-05-27"));
        assert_eq!(top_up_end_date("garbage", as_of), day("2025-06-08"));
    }

    #[test]
    fn test_is_expired() {
        let deposit = term_ending("2025-06-30");
        assert!(!is_expired(&deposit, day("2025-06-30")));
        assert!(is_expired(&deposit, day("2025-07-01")));

        let open_ended =
            Deposit::new("s", "s", "Alfa", Money::from_minor(1), Rate::from_percent(dec!(1)));
        assert!(!is_expired(&open_ended, day("2099-01-01")));
    }

    #[test]
    fn test_days_until() {
        let as_of = day("2025-06-01");
        assert_eq!(days_until(Some("2025-06-11"), as_of), 10);
        assert_eq!(days_until(Some("2025-05-30"), as_of), -2);
        assert_eq!(days_until(Some("soon"), as_of), UNKNOWN_DAYS);
        assert_eq!(days_until(None, as_of), UNKNOWN_DAYS);
    }

    #[test]
    fn test_can_be_prolonged_window() {
        let deposit = term_ending("2025-06-30");
        assert!(!can_be_prolonged(&deposit, day("2025-06-22")));
        assert!(can_be_prolonged(&deposit, day("2025-06-23")));
        assert!(can_be_prolonged(&deposit, day("2025-06-30")));
        // Stays open indefinitely after the end date.
        assert!(can_be_prolonged(&deposit, day("2027-01-01")));
    }

    #[test]
    fn test_can_be_prolonged_requires_term_and_end() {
        let mut savings = term_ending("2025-06-30");
        savings.kind = accrue_core::types::DepositKind::Savings;
        assert!(!can_be_prolonged(&savings, day("2025-06-30")));

        let no_end = term_ending("");
        assert!(!can_be_prolonged(&no_end, day("2025-06-30")));
    }

    #[test]
    fn test_grace_days_close_the_window() {
        let policy = ProlongationPolicy::default().with_grace_days(30);
        let deposit = term_ending("2025-06-30");
        assert!(policy.allows(&deposit, day("2025-07-30")));
        assert!(!policy.allows(&deposit, day("2025-07-31")));
    }
}
