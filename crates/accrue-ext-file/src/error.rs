//! Error types for file collaborators.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by the deposit store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The deposit file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The deposit file is not valid JSON for a deposit book.
    #[error("cannot parse deposit file {path}: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// No deposit carries the requested identifier.
    #[error("deposit with ID {id} not found")]
    NotFound {
        /// Requested identifier.
        id: String,
    },

    /// A deposit with the same identifier already exists.
    #[error("deposit with ID {id} already exists")]
    Duplicate {
        /// Conflicting identifier.
        id: String,
    },

    /// Applying an amount change would overflow the principal.
    #[error("amount overflow on deposit {id}")]
    AmountOverflow {
        /// Deposit identifier.
        id: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// Result type for deposit store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the ledger writer.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger file could not be opened or appended to.
    #[error("I/O error on ledger {path}: {source}")]
    Io {
        /// Ledger file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
