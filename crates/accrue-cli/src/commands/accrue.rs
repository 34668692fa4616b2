//! Daily interest booking.

use accrue_engine::accrual::{Accrual, AccrualKind, AccrualOutcome, AccrualRun};
use accrue_engine::plan_accruals;
use accrue_ext_file::{DepositBook, DepositOperation, StoreError};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{format_money, print_info, print_output, print_warning};

/// Arguments for the accrue command.
#[derive(Args, Debug)]
pub struct AccrueArgs {
    /// Show what would be booked without touching the ledger or the deposit book
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct AccrualRow {
    #[tabled(rename = "ID")]
    deposit_id: String,
    #[tabled(rename = "Deposit")]
    deposit_name: String,
    #[tabled(rename = "Interest")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Book the interest due today: one day for every savings deposit and the
/// whole-term payout for term deposits that have matured and not been paid.
///
/// Each accrual is written to the ledger first and then added to the principal.
/// A failure on one deposit does not stop the others.
pub fn execute(ctx: &Context, args: &AccrueArgs) -> CliResult<()> {
    let book = ctx.book()?;
    let run = plan_accruals(&book, ctx.as_of);
    tracing::debug!(
        as_of = %run.as_of,
        planned = run.accrued_count(),
        "accrual run planned"
    );

    let mut rows = Vec::new();
    let mut failed = report_planning_failures(&run);

    for accrual in run.accruals() {
        let status = if args.dry_run {
            "planned".to_string()
        } else {
            match book_accrual(ctx, &book, accrual) {
                Ok(()) => "booked".to_string(),
                Err(e) => {
                    print_warning(&format!("{}: {e}", accrual.deposit_name));
                    failed += 1;
                    "failed".to_string()
                }
            }
        };
        rows.push(AccrualRow {
            deposit_id: accrual.deposit_id.clone(),
            deposit_name: accrual.deposit_name.clone(),
            amount: format_money(accrual.amount, ctx.commodity()),
            status,
        });
    }

    print_output(&rows, ctx.format, |row| {
        format!("{} {}", row.deposit_id, row.amount)
    })?;
    if ctx.format == OutputFormat::Table {
        if rows.is_empty() {
            print_info("No deposits accrue interest today");
        } else {
            print_info(&format!(
                "Total {}: {} over {} deposits",
                if args.dry_run { "planned" } else { "accrued" },
                format_money(run.total(), ctx.commodity()),
                run.accrued_count()
            ));
        }
    }

    if failed > 0 {
        return Err(CliError::AccrualFailed {
            failed,
            total: run.outcomes.len(),
        });
    }
    Ok(())
}

fn report_planning_failures(run: &AccrualRun) -> usize {
    for outcome in &run.outcomes {
        if let AccrualOutcome::Failed { deposit_id, error } = outcome {
            print_warning(&format!("{deposit_id}: {error}"));
        }
    }
    run.failure_count()
}

fn book_accrual(
    ctx: &Context,
    book: &DepositBook,
    accrual: &Accrual,
) -> CliResult<()> {
    let deposit = book
        .get(&accrual.deposit_id)
        .ok_or_else(|| StoreError::not_found(&accrual.deposit_id))?;

    ctx.ledger.record(
        deposit,
        DepositOperation::Interest,
        accrual.amount,
        Some(&accrual.description),
        ctx.as_of,
    )?;
    match accrual.kind {
        AccrualKind::Daily => ctx.store.update_amount(&accrual.deposit_id, accrual.amount)?,
        AccrualKind::Maturity => {
            ctx.store
                .pay_maturity(&accrual.deposit_id, accrual.amount, ctx.as_of)?
        }
    };
    tracing::info!(
        deposit = %accrual.deposit_id,
        amount = %accrual.amount,
        kind = ?accrual.kind,
        "interest booked"
    );
    Ok(())
}
