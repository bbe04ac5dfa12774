//! Rebalance command implementation.

use anyhow::Result;
use tcdp_rs_engine::{decide_rebalance, RatioState, Thresholds};

use crate::cli::{OutputFormat, WriteArgs};
use crate::commands::{read_snapshot, signing_client, submit};
use crate::output::format_rebalance_decision;

pub async fn run_rebalance(
    args: &WriteArgs,
    thresholds: &Thresholds,
    format: OutputFormat,
) -> Result<()> {
    let (client, account) = signing_client(&args.connection, &args.signer).await?;
    let snapshot = read_snapshot(&client, account).await?;

    let decision = decide_rebalance(&snapshot.position, thresholds);
    let summary = format_rebalance_decision(&decision);

    let operation = match decision.action {
        Some(operation) => Ok(operation),
        None if decision.state == RatioState::Ok => {
            match format {
                OutputFormat::Table => {
                    println!("{}", summary);
                    println!("Ratio is within its band; no rebalance needed.");
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
            }
            return Ok(());
        }
        None if decision.state == RatioState::BootstrapRequired => {
            Err("The pool has no debt yet; deposit to initiate it first".to_string())
        }
        None => Err("Collateral or debt could not be read; try again".to_string()),
    };

    submit(
        &client,
        &decision,
        &summary,
        operation,
        &args.signer,
        format,
        thresholds.base_decimals,
    )
    .await
}
