//! Accrue CLI - track bank deposits and book interest.
//!
//! # Usage
//!
//! ```bash
//! # List deposits
//! accrue list
//!
//! # Project 30 days of income
//! accrue income yandex-savings --days 30
//!
//! # Book today's interest
//! accrue accrue --dry-run
//! accrue accrue
//!
//! # Open a six-month term deposit
//! accrue add --name "Alfa six months" --bank Alfa --kind term --amount 100000 --rate 17 --term-months 6
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::AppConfig;

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    let ctx = Context::new(config, cli.format, cli.as_of);

    match cli.command {
        Commands::List => commands::deposits::list(&ctx)?,
        Commands::Show(args) => commands::deposits::show(&ctx, &args)?,
        Commands::Find(args) => commands::deposits::find(&ctx, &args)?,
        Commands::Add(args) => commands::deposits::add(&ctx, args)?,
        Commands::TopUp(args) => commands::deposits::top_up(&ctx, &args)?,
        Commands::Income(args) => commands::income::income(&ctx, &args)?,
        Commands::TermIncome(args) => commands::income::term_income(&ctx, &args)?,
        Commands::Promo(args) => commands::income::promo(&ctx, &args)?,
        Commands::Maturity(args) => commands::schedule::maturity(&ctx, &args)?,
        Commands::Prolong(args) => commands::schedule::prolong(&ctx, &args)?,
        Commands::Accrue(args) => commands::accrue::execute(&ctx, &args)?,
    }

    Ok(())
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
