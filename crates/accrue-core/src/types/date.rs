//! Calendar date type for deposit schedules.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{AccrueError, AccrueResult};

/// Storage and exchange format for every date in the toolkit.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date with no time-of-day component.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. All comparisons are
/// plain calendar comparisons, so there is no local-midnight drift.
///
/// # Example
///
/// ```rust
/// use accrue_core::types::Date;
///
/// let date = Date::parse("2025-01-31").unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next.to_string(), "2025-02-28");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AccrueResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| AccrueError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> AccrueResult<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Date)
            .map_err(|_| AccrueError::invalid_date(format!("Cannot parse: {s}, must be YYYY-MM-DD")))
    }

    /// Parses an optional stored date, treating empty and malformed values as absent.
    ///
    /// `field` is only used for the debug log line emitted on a parse failure.
    pub fn parse_lenient(raw: Option<&str>, field: &str) -> Option<Self> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        match Self::parse(raw) {
            Ok(date) => Some(date),
            Err(err) => {
                log::debug!("ignoring {field}={raw:?}: {err}");
                None
            }
        }
    }

    /// Returns today's date in UTC.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Utc::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of calendar months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> AccrueResult<Self> {
        let total_months =
            i64::from(self.year()) * 12 + i64::from(self.month()) - 1 + i64::from(months);
        let new_year = i32::try_from(total_months.div_euclid(12)).map_err(|_| {
            AccrueError::invalid_date(format!("{self} plus {months} months is out of range"))
        })?;
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        // Clamp day to valid range for new month
        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    ///
    /// Negative when `other` is earlier.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Formats the date the way ledger files expect (`YYYY/MM/DD`).
    #[must_use]
    pub fn to_ledger_string(&self) -> String {
        self.0.format("%Y/%m/%d").to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for Date {
    type Err = AccrueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!("month is always normalised to 1..=12"),
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
