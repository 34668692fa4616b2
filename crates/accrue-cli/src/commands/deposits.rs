//! Deposit book commands: list, show, add and top-up.

use accrue_core::types::{Date, Deposit, DepositKind, Money, Rate};
use accrue_core::validation::DepositValidator;
use accrue_engine::{
    calculate_income, check_promo_status, days_until, is_expired, maturity_date,
    top_up_end_date, total_term_income, AccrualConvention, AccrualMethod, PromoStatus,
};
use accrue_ext_file::DepositOperation;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use super::{Context, DepositIdArgs};
use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{
    format_amount, format_money, format_rate, print_header, print_info, print_output,
    print_single, print_success, print_warning, KeyValue,
};

/// Largest single top-up, in minor units.
const MAX_TOP_UP: Money = Money::from_minor(10_000_000);

/// Period used for the "monthly income" estimate.
const MONTH_DAYS: i64 = 30;

// =============================================================================
// LIST
// =============================================================================

#[derive(Debug, Serialize, Tabled)]
struct DepositRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Income / 30d")]
    monthly_income: String,
    #[tabled(rename = "Ends")]
    ends: String,
}

fn rate_label(deposit: &Deposit, promo: PromoStatus) -> String {
    match deposit.promo() {
        Some((rate, end)) if promo.active => format!(
            "{} until {end} ({} d left)",
            format_rate(rate),
            promo.days_remaining
        ),
        _ => format_rate(deposit.interest_rate),
    }
}

/// List all deposits.
pub fn list(ctx: &Context) -> CliResult<()> {
    let book = ctx.book()?;

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&book.deposits)?);
        return Ok(());
    }

    let rows: Vec<DepositRow> = book
        .iter()
        .map(|d| DepositRow {
            id: d.id.clone(),
            name: d.name.clone(),
            bank: d.bank.clone(),
            kind: d.kind.to_string(),
            amount: format_money(d.amount, ctx.commodity()),
            rate: rate_label(d, check_promo_status(d, ctx.as_of)),
            monthly_income: format_amount(calculate_income(d, MONTH_DAYS, ctx.as_of)),
            ends: d.end().map_or_else(|| "-".to_string(), |e| e.to_string()),
        })
        .collect();

    print_output(&rows, ctx.format, |row| row.id.clone())?;

    if ctx.format == OutputFormat::Table && !book.is_empty() {
        let total: Money = book.iter().map(|d| d.amount).sum();
        print_info(&format!(
            "{} deposits, total {}",
            book.len(),
            format_money(total, ctx.commodity())
        ));
    }
    Ok(())
}

// =============================================================================
// SHOW
// =============================================================================

#[derive(Debug, Serialize)]
struct DepositReport<'a> {
    deposit: &'a Deposit,
    as_of: Date,
    convention: String,
    promo: PromoStatus,
    days_until_end: Option<i64>,
    income_30_days: Decimal,
    term_income: Option<Decimal>,
    can_be_prolonged: bool,
    expired: bool,
}

fn convention_label(convention: AccrualConvention) -> String {
    let method = match convention.method() {
        AccrualMethod::Simple => "simple",
        AccrualMethod::DailyCompound => "daily compounding",
        AccrualMethod::MonthlyCompound => "monthly compounding",
    };
    format!("{method}, {}", convention.day_count().name())
}

/// Show one deposit.
pub fn show(ctx: &Context, args: &DepositIdArgs) -> CliResult<()> {
    let deposit = ctx.deposit(&args.id)?;
    let as_of = ctx.as_of;

    let report = DepositReport {
        deposit: &deposit,
        as_of,
        convention: convention_label(AccrualConvention::for_deposit(&deposit)),
        promo: check_promo_status(&deposit, as_of),
        days_until_end: deposit
            .end_date
            .as_deref()
            .filter(|_| deposit.end().is_some())
            .map(|end| days_until(Some(end), as_of)),
        income_30_days: calculate_income(&deposit, MONTH_DAYS, as_of),
        term_income: deposit.is_term().then(|| total_term_income(&deposit)),
        can_be_prolonged: ctx.config.prolongation.allows(&deposit, as_of),
        expired: is_expired(&deposit, as_of),
    };

    let or_dash = |v: Option<&String>| v.cloned().unwrap_or_else(|| "-".to_string());
    let mut rows = vec![
        KeyValue::new("ID", &deposit.id),
        KeyValue::new("Name", &deposit.name),
        KeyValue::new("Bank", &deposit.bank),
        KeyValue::new("Type", deposit.kind.to_string()),
        KeyValue::new("Amount", format_money(deposit.amount, ctx.commodity())),
        KeyValue::new("Initial amount", format_money(deposit.initial_amount, ctx.commodity())),
        KeyValue::new("Base rate", format_rate(deposit.interest_rate)),
        KeyValue::new("Rate now", rate_label(&deposit, report.promo)),
        KeyValue::new("Capitalization", deposit.capitalization.to_string()),
        KeyValue::new("Accrual", &report.convention),
        KeyValue::new("Start", or_dash(deposit.start_date.as_ref())),
        KeyValue::new("End", or_dash(deposit.end_date.as_ref())),
    ];
    if let Some(days) = report.days_until_end {
        rows.push(KeyValue::new("Days to end", days.to_string()));
    }
    if let Some(until) = &deposit.top_up_end_date {
        rows.push(KeyValue::new("Top-ups until", until));
    }
    rows.push(KeyValue::new(
        "Income / 30d",
        format_amount(report.income_30_days),
    ));
    if let Some(term_income) = report.term_income {
        rows.push(KeyValue::new("Term income", format_amount(term_income)));
        rows.push(KeyValue::new("Auto renewal", deposit.auto_renewal.to_string()));
        rows.push(KeyValue::new("Expired", report.expired.to_string()));
        rows.push(KeyValue::new("Can be prolonged", report.can_be_prolonged.to_string()));
    }

    print_single(
        &format!("Deposit {}", deposit.name),
        &rows,
        &report,
        &deposit.amount.to_string(),
        ctx.format,
    )
}

// =============================================================================
// FIND
// =============================================================================

/// Arguments for the find command.
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Deposit display name
    #[arg(long)]
    pub name: String,

    /// Bank identifier
    #[arg(long)]
    pub bank: String,
}

/// Look a deposit up by name and bank and show it.
///
/// A miss is not an error: the command reports it and succeeds.
pub fn find(ctx: &Context, args: &FindArgs) -> CliResult<()> {
    let book = ctx.book()?;
    if let Some(deposit) = book.find_by_name_and_bank(&args.name, &args.bank) {
        tracing::debug!(id = %deposit.id, "deposit found by name and bank");
        return show(ctx, &DepositIdArgs { id: deposit.id.clone() });
    }

    match ctx.format {
        OutputFormat::Table => print_info(&format!(
            "No deposit '{}' at bank '{}'",
            args.name, args.bank
        )),
        OutputFormat::Json => println!("null"),
        OutputFormat::Minimal => {}
    }
    Ok(())
}

// =============================================================================
// ADD
// =============================================================================

/// Deposit kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Open-ended savings account
    Savings,
    /// Fixed-term deposit
    Term,
}

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Bank (e.g. Yandex, Alfa, Tinkoff, Sberbank, VTB)
    #[arg(long)]
    pub bank: String,

    /// Deposit kind
    #[arg(long, value_enum, default_value = "savings")]
    pub kind: KindArg,

    /// Opening amount in major units (e.g. 1500.50)
    #[arg(long)]
    pub amount: Money,

    /// Base annual rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Term in months (term deposits)
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Promotional annual rate in percent
    #[arg(long)]
    pub promo_rate: Option<Decimal>,

    /// Last day of the promotional rate (YYYY-MM-DD)
    #[arg(long)]
    pub promo_end: Option<String>,

    /// Capitalization policy (daily, monthly, end, quarterly)
    #[arg(long, default_value = "daily")]
    pub capitalization: String,

    /// Identifier; generated from the name when omitted
    #[arg(long)]
    pub id: Option<String>,

    /// Do not renew the deposit automatically
    #[arg(long)]
    pub no_auto_renewal: bool,
}

/// Builds the deposit record described by `args`, opened on `as_of`.
fn build_deposit(args: AddArgs, as_of: Date) -> CliResult<Deposit> {
    let start = as_of.to_string();
    let mut deposit = Deposit::new(
        args.id.unwrap_or_default(),
        args.name.trim(),
        args.bank.trim(),
        args.amount,
        Rate::from_percent(args.rate),
    )
    .with_capitalization(args.capitalization.trim())
    .with_start(start.clone());

    deposit.promo_rate = args.promo_rate.map(Rate::from_percent);
    deposit.promo_end_date = args.promo_end;
    deposit.auto_renewal = !args.no_auto_renewal;

    if args.kind == KindArg::Term {
        deposit.kind = DepositKind::Term;
        deposit.term_months = args.term_months;
        if let Some(months) = args.term_months.filter(|m| *m > 0) {
            deposit.end_date = Some(maturity_date(&start, months)?.to_string());
            deposit.top_up_end_date = Some(top_up_end_date(&start, as_of).to_string());
        }
    }

    Ok(deposit)
}

/// Open a new deposit.
pub fn add(ctx: &Context, args: AddArgs) -> CliResult<()> {
    let deposit = build_deposit(args, ctx.as_of)?;
    DepositValidator::new().validate(&deposit)?;

    let stored = ctx.store.insert(deposit)?;
    ctx.ledger.record(
        &stored,
        DepositOperation::Create,
        stored.amount,
        None,
        ctx.as_of,
    )?;
    tracing::info!(id = %stored.id, "deposit opened");

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stored)?),
        OutputFormat::Minimal => println!("{}", stored.id),
        OutputFormat::Table => {
            print_success(&format!("Deposit '{}' created ({})", stored.name, stored.id));
            if let Some(end) = &stored.end_date {
                print_info(&format!("Ends {end}"));
            }
        }
    }
    Ok(())
}

// =============================================================================
// TOP-UP
// =============================================================================

/// Arguments for the top-up command.
#[derive(Args, Debug)]
pub struct TopUpArgs {
    /// Deposit identifier
    pub id: String,

    /// Amount in major units (e.g. 5000 or 5000,50)
    pub amount: Money,
}

fn check_top_up(amount: Money) -> CliResult<Money> {
    if !amount.is_positive() {
        return Err(CliError::InvalidTopUp(format!("{amount} must be positive")));
    }
    if amount > MAX_TOP_UP {
        return Err(CliError::InvalidTopUp(format!(
            "{amount} exceeds the maximum of {MAX_TOP_UP}"
        )));
    }
    Ok(amount)
}

/// Add money to a deposit.
pub fn top_up(ctx: &Context, args: &TopUpArgs) -> CliResult<()> {
    let amount = check_top_up(args.amount)?;
    let deposit = ctx.deposit(&args.id)?;

    if let Some(until) = Date::parse_lenient(deposit.top_up_end_date.as_deref(), "top_up_end_date") {
        if ctx.as_of > until {
            print_warning(&format!("top-up window of {} closed on {until}", deposit.name));
        }
    }

    let updated = ctx.store.update_amount(&deposit.id, amount)?;
    ctx.ledger
        .record(&updated, DepositOperation::TopUp, amount, None, ctx.as_of)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Minimal => println!("{}", updated.amount),
        OutputFormat::Table => {
            print_header(&updated.name);
            print_success(&format!(
                "Topped up by {}, balance {}",
                format_money(amount, ctx.commodity()),
                format_money(updated.amount, ctx.commodity())
            ));
        }
    }
    Ok(())
}
