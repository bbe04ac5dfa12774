//! tCDP CLI - project deposits and withdrawals, rebalance and migrate a tokenized CDP.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use cli::{Cli, Commands};
use commands::{
    load_thresholds, run_approve, run_deposit, run_migrate, run_rebalance, run_status,
    run_withdraw,
};

/// Logs go to stderr so stdout stays parseable with `--format json`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let thresholds = load_thresholds(cli.config.as_deref())?;

    match &cli.command {
        Commands::Status(args) => run_status(args, &thresholds, cli.format).await?,
        Commands::Deposit(args) => run_deposit(args, &thresholds, cli.format).await?,
        Commands::Withdraw(args) => run_withdraw(args, &thresholds, cli.format).await?,
        Commands::Approve(args) => run_approve(args, &thresholds, cli.format).await?,
        Commands::Rebalance(args) => run_rebalance(args, &thresholds, cli.format).await?,
        Commands::Migrate(args) => run_migrate(args, &thresholds, cli.format).await?,
    }

    Ok(())
}
