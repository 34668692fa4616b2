//! Income and promo commands.

use accrue_engine::{check_promo_status, project_income, total_term_income};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Context, DepositIdArgs};
use crate::error::{CliError, CliResult};
use crate::output::{format_amount, format_money, format_rate, print_single, KeyValue};

/// Arguments for the income command.
#[derive(Args, Debug)]
pub struct IncomeArgs {
    /// Deposit identifier
    pub id: String,

    /// Period length in days
    #[arg(long, default_value = "30", allow_negative_numbers = true)]
    pub days: i64,
}

/// Project the income of a deposit.
pub fn income(ctx: &Context, args: &IncomeArgs) -> CliResult<()> {
    let deposit = ctx.deposit(&args.id)?;
    let projection = project_income(&deposit, args.days, ctx.as_of)?;
    let breakdown = projection.breakdown;

    let mut rows = vec![
        KeyValue::new("Principal", format_money(projection.principal, ctx.commodity())),
        KeyValue::new("Base rate", format_rate(projection.interest_rate)),
        KeyValue::new("Capitalization", deposit.capitalization.to_string()),
        KeyValue::new("Period", format!("{} days", projection.days)),
    ];
    if breakdown.promo_days > 0 {
        rows.push(KeyValue::new(
            "Promo income",
            format!("{} ({} d)", format_amount(breakdown.promo_income), breakdown.promo_days),
        ));
        rows.push(KeyValue::new(
            "Base income",
            format!("{} ({} d)", format_amount(breakdown.base_income), breakdown.base_days),
        ));
    }
    rows.push(KeyValue::new("Income", format_amount(projection.income)));
    rows.push(KeyValue::new("Total", format_amount(projection.total)));

    print_single(
        &format!("Income of {} over {} days", deposit.name, projection.days),
        &rows,
        &projection,
        &format_amount(projection.income),
        ctx.format,
    )
}

#[derive(Debug, Serialize)]
struct TermIncomeReport {
    deposit_id: String,
    start_date: Option<String>,
    end_date: Option<String>,
    term_days: Option<i64>,
    income: Decimal,
}

/// Income of a term deposit over its whole term.
pub fn term_income(ctx: &Context, args: &DepositIdArgs) -> CliResult<()> {
    let deposit = ctx.deposit(&args.id)?;
    if !deposit.is_term() {
        return Err(CliError::NotTermDeposit(deposit.id));
    }

    let report = TermIncomeReport {
        income: total_term_income(&deposit),
        term_days: deposit.term_days(),
        start_date: deposit.start_date.clone(),
        end_date: deposit.end_date.clone(),
        deposit_id: deposit.id.clone(),
    };

    let rows = vec![
        KeyValue::new("Principal", format_money(deposit.amount, ctx.commodity())),
        KeyValue::new("Start", report.start_date.clone().unwrap_or_default()),
        KeyValue::new("End", report.end_date.clone().unwrap_or_default()),
        KeyValue::new(
            "Term",
            report
                .term_days
                .map_or_else(|| "-".to_string(), |d| format!("{d} days")),
        ),
        KeyValue::new("Income", format_amount(report.income)),
    ];

    print_single(
        &format!("Term income of {}", deposit.name),
        &rows,
        &report,
        &format_amount(report.income),
        ctx.format,
    )
}

#[derive(Debug, Serialize)]
struct PromoReport {
    deposit_id: String,
    active: bool,
    days_remaining: i64,
    promo_rate: Option<String>,
    promo_end_date: Option<String>,
}

/// Promotional-rate status of a deposit.
pub fn promo(ctx: &Context, args: &DepositIdArgs) -> CliResult<()> {
    let deposit = ctx.deposit(&args.id)?;
    let status = check_promo_status(&deposit, ctx.as_of);

    let report = PromoReport {
        deposit_id: deposit.id.clone(),
        active: status.active,
        days_remaining: status.days_remaining,
        promo_rate: deposit.promo_rate.map(format_rate),
        promo_end_date: deposit.promo_end_date.clone(),
    };

    let rows = vec![
        KeyValue::new("Active", status.active.to_string()),
        KeyValue::new("Days remaining", status.days_remaining.to_string()),
        KeyValue::new("Promo rate", report.promo_rate.clone().unwrap_or_else(|| "-".into())),
        KeyValue::new("Promo ends", report.promo_end_date.clone().unwrap_or_else(|| "-".into())),
        KeyValue::new("Base rate", format_rate(deposit.interest_rate)),
    ];

    print_single(
        &format!("Promo status of {}", deposit.name),
        &rows,
        &report,
        &format!("{} {}", status.active, status.days_remaining),
        ctx.format,
    )
}
