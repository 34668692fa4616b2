//! CLI command implementations.

pub mod accrue;
pub mod deposits;
pub mod income;
pub mod schedule;

pub use accrue::AccrueArgs;
pub use deposits::{AddArgs, FindArgs, TopUpArgs};
pub use income::IncomeArgs;
pub use schedule::MaturityArgs;

use accrue_core::types::{Date, Deposit};
use accrue_ext_file::{DepositBook, JsonDepositStore, LedgerWriter};
use clap::Args;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::error::CliResult;

/// A command that targets one deposit.
#[derive(Args, Debug)]
pub struct DepositIdArgs {
    /// Deposit identifier
    pub id: String,
}

/// Everything a command needs: configuration, collaborators, output format and date.
pub struct Context {
    pub config: AppConfig,
    pub format: OutputFormat,
    pub as_of: Date,
    pub store: JsonDepositStore,
    pub ledger: LedgerWriter,
}

impl Context {
    /// Builds the context; `as_of` defaults to today in UTC.
    pub fn new(config: AppConfig, format: OutputFormat, as_of: Option<Date>) -> Self {
        let store = JsonDepositStore::new(&config.deposits_path);
        let ledger =
            LedgerWriter::new(&config.ledger_path).with_commodity(config.ledger_commodity.clone());
        Self {
            format,
            as_of: as_of.unwrap_or_else(Date::today),
            store,
            ledger,
            config,
        }
    }

    /// Loads the deposit book.
    pub fn book(&self) -> CliResult<DepositBook> {
        Ok(self.store.load()?)
    }

    /// Loads one deposit.
    pub fn deposit(&self, id: &str) -> CliResult<Deposit> {
        Ok(self.store.get(id)?)
    }

    /// Commodity symbol for displayed amounts.
    pub fn commodity(&self) -> &str {
        &self.config.ledger_commodity
    }
}
