//! Maturity and prolongation commands.

use accrue_core::types::Date;
use accrue_core::validation::DepositValidator;
use accrue_engine::{check_promo_status, maturity_date, top_up_end_date};
use clap::Args;
use serde::Serialize;

use super::{Context, DepositIdArgs};
use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_single, print_success, KeyValue};

/// Arguments for the maturity command.
#[derive(Args, Debug)]
pub struct MaturityArgs {
    /// Opening date (YYYY-MM-DD). Defaults to the reference date.
    #[arg(long)]
    pub start: Option<String>,

    /// Term in months
    #[arg(long)]
    pub months: u32,
}

#[derive(Debug, Serialize)]
struct MaturityReport {
    start_date: String,
    term_months: u32,
    maturity_date: Date,
    top_up_end_date: Date,
}

/// Maturity date for a start date and a term.
pub fn maturity(ctx: &Context, args: &MaturityArgs) -> CliResult<()> {
    let start = args
        .start
        .clone()
        .unwrap_or_else(|| ctx.as_of.to_string());
    let report = MaturityReport {
        maturity_date: maturity_date(&start, args.months)?,
        top_up_end_date: top_up_end_date(&start, ctx.as_of),
        term_months: args.months,
        start_date: start,
    };

    let rows = vec![
        KeyValue::new("Start", &report.start_date),
        KeyValue::new("Term", format!("{} months", report.term_months)),
        KeyValue::new("Maturity", report.maturity_date.to_string()),
        KeyValue::new("Top-ups until", report.top_up_end_date.to_string()),
    ];

    print_single(
        "Maturity",
        &rows,
        &report,
        &report.maturity_date.to_string(),
        ctx.format,
    )
}

/// Prolong a term deposit: restart it on the reference date for the same term.
///
/// A promo that is no longer active does not carry over into the new term.
pub fn prolong(ctx: &Context, args: &DepositIdArgs) -> CliResult<()> {
    let mut deposit = ctx.deposit(&args.id)?;
    if !deposit.is_term() {
        return Err(CliError::NotTermDeposit(deposit.id));
    }
    if !ctx.config.prolongation.allows(&deposit, ctx.as_of) {
        return Err(CliError::NotProlongable {
            end_date: deposit.end_date.clone().unwrap_or_default(),
            id: deposit.id,
        });
    }

    let start = ctx.as_of.to_string();
    let months = deposit.term_months.unwrap_or_default();
    deposit.end_date = Some(maturity_date(&start, months)?.to_string());
    deposit.top_up_end_date = Some(top_up_end_date(&start, ctx.as_of).to_string());
    deposit.start_date = Some(start);
    deposit.maturity_paid_on = None;
    if deposit.promo_rate.is_some() && !check_promo_status(&deposit, ctx.as_of).active {
        tracing::info!(id = %deposit.id, ended = ?deposit.promo_end_date, "expired promo dropped");
        deposit.promo_rate = None;
        deposit.promo_end_date = None;
    }
    DepositValidator::new().validate(&deposit)?;

    let updated = ctx.store.update(deposit)?;
    tracing::info!(id = %updated.id, end = ?updated.end_date, "deposit prolonged");

    match ctx.format {
        OutputFormat::Table => {
            print_success(&format!("Deposit '{}' prolonged", updated.name));
            let rows = vec![
                KeyValue::new("Start", updated.start_date.clone().unwrap_or_default()),
                KeyValue::new("End", updated.end_date.clone().unwrap_or_default()),
                KeyValue::new("Top-ups until", updated.top_up_end_date.clone().unwrap_or_default()),
            ];
            print_single("Prolongation", &rows, &updated, "", ctx.format)?;
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Minimal => println!("{}", updated.end_date.unwrap_or_default()),
    }
    Ok(())
}
