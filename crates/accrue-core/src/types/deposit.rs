//! Deposit record and its enumerations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Date, Money, Rate};

/// Deposit product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DepositKind {
    /// Open-ended savings account; accrues interest daily.
    #[default]
    Savings,
    /// Fixed-term deposit with a start and an end date.
    Term,
}

impl fmt::Display for DepositKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepositKind::Savings => write!(f, "savings"),
            DepositKind::Term => write!(f, "term"),
        }
    }
}

/// Declared interest capitalization policy.
///
/// Unknown policy strings are kept verbatim in [`Capitalization::Unrecognized`]
/// so that a record round-trips unchanged; the engine prices them as
/// end-of-term interest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Capitalization {
    /// Interest compounds every day.
    #[default]
    Daily,
    /// Interest compounds once per (average) month.
    Monthly,
    /// Quarterly payout; accepted on creation, priced as end-of-term.
    Quarterly,
    /// Simple interest paid at the end of the term.
    End,
    /// Any other policy string.
    Unrecognized(String),
}

impl Capitalization {
    /// Returns the canonical policy string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Capitalization::Daily => "daily",
            Capitalization::Monthly => "monthly",
            Capitalization::Quarterly => "quarterly",
            Capitalization::End => "end",
            Capitalization::Unrecognized(other) => other,
        }
    }

    /// Returns true for policies the validator accepts.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Capitalization::Unrecognized(_))
    }
}

impl From<String> for Capitalization {
    fn from(s: String) -> Self {
        match s.as_str() {
            "daily" => Capitalization::Daily,
            "monthly" => Capitalization::Monthly,
            "quarterly" => Capitalization::Quarterly,
            "end" => Capitalization::End,
            _ => Capitalization::Unrecognized(s),
        }
    }
}

impl From<&str> for Capitalization {
    fn from(s: &str) -> Self {
        Capitalization::from(s.to_string())
    }
}

impl From<Capitalization> for String {
    fn from(c: Capitalization) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Capitalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bank deposit as stored in the deposit book.
///
/// Date fields hold the raw `YYYY-MM-DD` strings of the record. The typed
/// accessors ([`Deposit::start`], [`Deposit::promo`], ...) parse leniently: an
/// empty or malformed value reads as absent. Strict checking happens in
/// [`DepositValidator`](crate::validation::DepositValidator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Opaque identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Bank identifier; selects bank-specific accrual quirks.
    pub bank: String,
    /// Savings or term.
    #[serde(rename = "type")]
    pub kind: DepositKind,
    /// Current principal in minor units.
    pub amount: Money,
    /// Principal at opening in minor units.
    #[serde(default)]
    pub initial_amount: Money,
    /// Base annual rate in percent.
    pub interest_rate: Rate,
    /// Promotional annual rate in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_rate: Option<Rate>,
    /// Last day the promotional rate applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_end_date: Option<String>,
    /// Opening date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Maturity date of a term deposit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Term length in months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    /// Declared capitalization policy.
    #[serde(default)]
    pub capitalization: Capitalization,
    /// Whether the bank renews the deposit automatically.
    #[serde(default)]
    pub auto_renewal: bool,
    /// Last day top-ups are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_up_end_date: Option<String>,
    /// Day the maturity interest of a term deposit was booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_paid_on: Option<String>,
    /// Record creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Deposit {
    /// Creates a savings deposit with the given principal and base rate.
    ///
    /// Remaining fields start empty; set them directly or through the `with_*` helpers.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        bank: impl Into<String>,
        amount: Money,
        interest_rate: Rate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bank: bank.into(),
            kind: DepositKind::Savings,
            amount,
            initial_amount: amount,
            interest_rate,
            promo_rate: None,
            promo_end_date: None,
            start_date: None,
            end_date: None,
            term_months: None,
            capitalization: Capitalization::default(),
            auto_renewal: false,
            top_up_end_date: None,
            maturity_paid_on: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the capitalization policy.
    #[must_use]
    pub fn with_capitalization(mut self, capitalization: impl Into<Capitalization>) -> Self {
        self.capitalization = capitalization.into();
        self
    }

    /// Sets a promotional rate ending on `end_date` (inclusive).
    #[must_use]
    pub fn with_promo(mut self, rate: Rate, end_date: impl Into<String>) -> Self {
        self.promo_rate = Some(rate);
        self.promo_end_date = Some(end_date.into());
        self
    }

    /// Turns the deposit into a term deposit over `[start, end]`.
    #[must_use]
    pub fn with_term(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.kind = DepositKind::Term;
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Sets the opening date.
    #[must_use]
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self
    }

    /// Returns true for fixed-term deposits.
    #[must_use]
    pub fn is_term(&self) -> bool {
        self.kind == DepositKind::Term
    }

    /// Opening date, if present and parseable.
    #[must_use]
    pub fn start(&self) -> Option<Date> {
        Date::parse_lenient(self.start_date.as_deref(), "start_date")
    }

    /// Maturity date, if present and parseable.
    #[must_use]
    pub fn end(&self) -> Option<Date> {
        Date::parse_lenient(self.end_date.as_deref(), "end_date")
    }

    /// Promotional rate and its last day, when both are configured and the date parses.
    #[must_use]
    pub fn promo(&self) -> Option<(Rate, Date)> {
        let rate = self.promo_rate?;
        let end = Date::parse_lenient(self.promo_end_date.as_deref(), "promo_end_date")?;
        Some((rate, end))
    }

    /// Calendar days from start to end, when both dates parse.
    #[must_use]
    pub fn term_days(&self) -> Option<i64> {
        Some(self.start()?.days_between(&self.end()?))
    }
}
