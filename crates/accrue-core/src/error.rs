//! Error types for the Accrue toolkit.
//!
//! The interest engine itself never fails: every variant here is raised by a
//! strict entry point (date parsing, money parsing, projections, validation)
//! and left for the caller to surface.

use thiserror::Error;

/// A specialized Result type for Accrue operations.
pub type AccrueResult<T> = Result<T, AccrueError>;

/// The main error type for Accrue operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrueError {
    /// A calendar date string did not parse as `YYYY-MM-DD`.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A projection was requested for a non-positive period.
    #[error("Invalid period: {days} days (period must be positive)")]
    InvalidPeriod {
        /// The rejected period length.
        days: i64,
    },

    /// A money amount could not be parsed or does not fit in minor units.
    #[error("Invalid amount: {reason}")]
    InvalidAmount {
        /// Description of what went wrong.
        reason: String,
    },

    /// Capitalization policy not known to the validator.
    #[error("Unsupported capitalization: {value} (allowed: daily, monthly, end, quarterly)")]
    UnsupportedCapitalization {
        /// The rejected policy string.
        value: String,
    },

    /// Deposit record failed creation-time validation.
    #[error("Deposit validation failed: {}", reasons.join("; "))]
    Validation {
        /// Every violated rule, in check order.
        reasons: Vec<String>,
    },

    /// Mathematical error (overflow in decimal conversion).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },
}

impl AccrueError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Returns true for date-format failures.
    #[must_use]
    pub fn is_date_format(&self) -> bool {
        matches!(self, Self::InvalidDate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccrueError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
        assert!(err.is_date_format());
    }

    #[test]
    fn test_validation_joins_reasons() {
        let err = AccrueError::Validation {
            reasons: vec!["name is empty".into(), "rate must be positive".into()],
        };
        assert_eq!(
            err.to_string(),
            "Deposit validation failed: name is empty; rate must be positive"
        );
    }

    #[test]
    fn test_invalid_period() {
        let err = AccrueError::InvalidPeriod { days: -3 };
        assert!(err.to_string().contains("-3 days"));
    }
}
