//! CLI error types.

use accrue_core::error::AccrueError;
use accrue_ext_file::{LedgerError, StoreError};
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid deposit data or calculation input.
    #[error(transparent)]
    Accrue(#[from] AccrueError),

    /// Deposit book failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Ledger failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Operation requires a term deposit.
    #[error("deposit {0} is not a term deposit")]
    NotTermDeposit(String),

    /// Term deposit is outside its prolongation window.
    #[error("deposit {id} cannot be prolonged yet (ends {end_date})")]
    NotProlongable {
        /// Deposit identifier.
        id: String,
        /// End date as stored.
        end_date: String,
    },

    /// Top-up amount is out of range.
    #[error("Invalid top-up amount: {0}")]
    InvalidTopUp(String),

    /// Some deposits could not be credited.
    #[error("{failed} of {total} interest accruals failed")]
    AccrualFailed {
        /// Failed accruals.
        failed: usize,
        /// Attempted accruals.
        total: usize,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
