//! Status command implementation.

use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde::Serialize;
use tcdp_rs_engine::{evaluate_status, Snapshot, StatusReport, Thresholds};

use crate::cli::{OutputFormat, StatusArgs};
use crate::commands::{read_only_client, read_snapshot};
use crate::output::format_status;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput<'a> {
    network: String,
    chain_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<Address>,
    snapshot: &'a Snapshot,
    report: &'a StatusReport,
}

pub async fn run_status(
    args: &StatusArgs,
    thresholds: &Thresholds,
    format: OutputFormat,
) -> Result<()> {
    let account: Option<Address> = args
        .account
        .as_deref()
        .map(str::parse)
        .transpose()
        .context("Invalid account address")?;

    let client = read_only_client(&args.connection).await?;
    // Without an account, balances of the zero address are discarded
    let snapshot = read_snapshot(&client, account.unwrap_or(Address::ZERO)).await?;
    let snapshot = if account.is_some() {
        snapshot
    } else {
        Snapshot {
            account: Default::default(),
            ..snapshot
        }
    };
    let report = evaluate_status(&snapshot, thresholds);

    match format {
        OutputFormat::Table => {
            println!(
                "{}",
                format_status(args.connection.chain.0, account, &snapshot, &report, thresholds)
            );
        }
        OutputFormat::Json => {
            let output = StatusOutput {
                network: args.connection.chain.to_string(),
                chain_id: args.connection.chain.0.chain_id(),
                account,
                snapshot: &snapshot,
                report: &report,
            };
            let json = serde_json::to_string_pretty(&output)?;
            println!("{}", json);
        }
    }

    Ok(())
}
