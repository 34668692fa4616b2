//! Output formatting utilities.

use accrue_core::types::{Money, Rate};
use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Prints rows as a table or JSON array; minimal prints the first column of each row.
pub fn print_output<T: Serialize + Tabled>(
    data: &[T],
    format: OutputFormat,
    minimal: impl Fn(&T) -> String,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Minimal => {
            for row in data {
                println!("{}", minimal(row));
            }
        }
    }
    Ok(())
}

/// Prints a single result: key/value table, JSON object, or one bare value.
pub fn print_single<T: Serialize>(
    title: &str,
    rows: &[KeyValue],
    data: &T,
    minimal: &str,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            print_table(rows);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Minimal => println!("{minimal}"),
    }
    Ok(())
}

fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
}

/// Rounds a major-unit amount half up to two decimals.
pub fn format_amount(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Formats money with its commodity symbol.
pub fn format_money(value: Money, commodity: &str) -> String {
    format!("{commodity}{value}")
}

/// Formats a rate as `17.5%`.
pub fn format_rate(rate: Rate) -> String {
    rate.to_string()
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Field")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
