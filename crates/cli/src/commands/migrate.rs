//! Migrate command implementation.

use anyhow::{Context, Result};
use tcdp_rs_engine::{advise_migration, Thresholds};

use crate::cli::{OutputFormat, WriteArgs};
use crate::commands::{read_snapshot, signing_client, submit};
use crate::output::format_migration_decision;

pub async fn run_migrate(
    args: &WriteArgs,
    thresholds: &Thresholds,
    format: OutputFormat,
) -> Result<()> {
    let (client, account) = signing_client(&args.connection, &args.signer).await?;
    let snapshot = read_snapshot(&client, account).await?;

    let current = snapshot
        .protocol
        .context("Active protocol could not be read; try again")?;
    let decision = advise_migration(current, &snapshot.rates, thresholds);
    let summary = format_migration_decision(&decision);

    let Some(operation) = decision.recommended_operation() else {
        match format {
            OutputFormat::Table => {
                println!("{}", summary);
                if decision.current_rate().is_none() || decision.target_rate().is_none() {
                    println!("Funding rates are unavailable; not migrating.");
                } else {
                    println!(
                        "{} already has the better funding rate; no migration needed.",
                        current
                    );
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
        }
        return Ok(());
    };

    submit(
        &client,
        &decision,
        &summary,
        Ok(operation),
        &args.signer,
        format,
        thresholds.base_decimals,
    )
    .await
}
