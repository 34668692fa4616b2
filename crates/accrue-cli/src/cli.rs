//! CLI argument definitions.

use std::path::PathBuf;

use accrue_core::types::Date;
use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    AccrueArgs, AddArgs, DepositIdArgs, FindArgs, IncomeArgs, MaturityArgs, TopUpArgs,
};

/// Accrue - track bank deposits, project interest and book it to a ledger
#[derive(Parser, Debug)]
#[command(name = "accrue")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "ACCRUE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Reference date (YYYY-MM-DD). Defaults to today in UTC.
    #[arg(long, global = true)]
    pub as_of: Option<Date>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all deposits
    List,

    /// Show one deposit with its promo, maturity and income details
    Show(DepositIdArgs),

    /// Find a deposit by name and bank
    Find(FindArgs),

    /// Project the income of a deposit over a number of days
    Income(IncomeArgs),

    /// Income of a term deposit over its whole term
    TermIncome(DepositIdArgs),

    /// Promotional-rate status of a deposit
    Promo(DepositIdArgs),

    /// Maturity date for a start date and a term in months
    Maturity(MaturityArgs),

    /// Prolong a term deposit that is ending or has ended
    Prolong(DepositIdArgs),

    /// Book today's interest: savings accrue daily, matured term deposits pay out once
    Accrue(AccrueArgs),

    /// Add money to a deposit
    TopUp(TopUpArgs),

    /// Open a new deposit
    Add(AddArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Minimal output (just the value)
    Minimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "accrue", "income", "abc", "--days", "30", "--as-of", "2025-03-01", "-f", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.as_of, Some(Date::from_ymd(2025, 3, 1).unwrap()));
        assert!(matches!(cli.command, Commands::Income(ref a) if a.id == "abc" && a.days == 30));
    }

    #[test]
    fn test_rejects_bad_as_of() {
        assert!(Cli::try_parse_from(["accrue", "list", "--as-of", "01.03.2025"]).is_err());
    }
}
