//! Plain-text ledger writer.
//!
//! Entries use the ledger-cli layout: a dated description line, a debit posting
//! carrying the amount and a balancing credit posting, then a blank line.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use accrue_core::types::{Date, Deposit, Money};

use crate::error::{LedgerError, LedgerResult};

/// Commodity symbol written in front of amounts unless configured otherwise.
pub const DEFAULT_COMMODITY: &str = "₽";

/// Account credited for interest payouts.
pub const INTEREST_ACCOUNT: &str = "i:Interest:Bank";

/// A deposit operation that gets booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositOperation {
    /// Opening a deposit.
    Create,
    /// Adding money to a deposit.
    TopUp,
    /// Interest credited to a deposit.
    Interest,
}

impl DepositOperation {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::TopUp => "top-up",
            Self::Interest => "interest",
        }
    }

    fn default_description(self, deposit: &Deposit) -> String {
        match self {
            Self::Create => format!("Open deposit {}", deposit.name),
            Self::TopUp => format!("Top up deposit {}", deposit.name),
            Self::Interest => "Interest payout".to_string(),
        }
    }
}

impl fmt::Display for DepositOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger account segment for a bank.
///
/// Known banks map to fixed short names; any other name has spaces and dashes removed.
pub fn ledger_bank_name(bank: &str) -> String {
    match bank {
        "Яндекс Банк" | "Yandex" => "Yandex".to_string(),
        "Альфа Банк" | "Alfa" => "AlfaBank".to_string(),
        "Тинькофф" | "Tinkoff" => "Tbank".to_string(),
        other => other.chars().filter(|c| *c != ' ' && *c != '-').collect(),
    }
}

/// One balanced ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Transaction date.
    pub date: Date,
    /// Payee / description line.
    pub description: String,
    /// Account receiving the amount.
    pub debit_account: String,
    /// Balancing account.
    pub credit_account: String,
    /// Amount moved.
    pub amount: Money,
}

impl LedgerEntry {
    /// Builds the entry for `operation` on `deposit`.
    ///
    /// Without a description, a default one for the operation is used.
    pub fn for_operation(
        deposit: &Deposit,
        operation: DepositOperation,
        amount: Money,
        description: Option<&str>,
        date: Date,
    ) -> Self {
        let bank = ledger_bank_name(&deposit.bank);
        let credit_account = match operation {
            DepositOperation::Create | DepositOperation::TopUp => format!("b:{bank}"),
            DepositOperation::Interest => INTEREST_ACCOUNT.to_string(),
        };
        let description = description
            .filter(|d| !d.trim().is_empty())
            .map_or_else(|| operation.default_description(deposit), str::to_string);

        Self {
            date,
            description,
            debit_account: format!("b:{bank}:Savings"),
            credit_account,
            amount,
        }
    }

    /// Renders the entry, amount prefixed by `commodity`.
    pub fn render(&self, commodity: &str) -> String {
        format!(
            "{} {}\n  {} {commodity}{}\n  {}\n\n",
            self.date.to_ledger_string(),
            self.description,
            self.debit_account,
            self.amount,
            self.credit_account,
        )
    }
}

/// Appends entries to a ledger file.
#[derive(Debug, Clone)]
pub struct LedgerWriter {
    path: PathBuf,
    commodity: String,
}

impl LedgerWriter {
    /// Creates a writer for `path` using [`DEFAULT_COMMODITY`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            commodity: DEFAULT_COMMODITY.to_string(),
        }
    }

    /// Sets the commodity symbol.
    #[must_use]
    pub fn with_commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = commodity.into();
        self
    }

    /// Ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry, creating the file and its directory as needed.
    pub fn append(&self, entry: &LedgerEntry) -> LedgerResult<()> {
        let io_err = |source| LedgerError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(entry.render(&self.commodity).as_bytes())
            .map_err(io_err)?;

        log::info!(
            "ledger: {} {} to {}",
            entry.description,
            entry.amount,
            entry.debit_account
        );
        Ok(())
    }

    /// Builds and appends the entry for a deposit operation.
    pub fn record(
        &self,
        deposit: &Deposit,
        operation: DepositOperation,
        amount: Money,
        description: Option<&str>,
        date: Date,
    ) -> LedgerResult<LedgerEntry> {
        log::debug!("recording {operation} of {amount} for deposit {}", deposit.id);
        let entry = LedgerEntry::for_operation(deposit, operation, amount, description, date);
        self.append(&entry)?;
        Ok(entry)
    }
}
