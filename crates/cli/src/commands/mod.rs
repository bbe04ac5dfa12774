//! Command implementations.

pub mod approve;
pub mod deposit;
pub mod migrate;
pub mod rebalance;
pub mod status;
pub mod withdraw;

pub use approve::run_approve;
pub use deposit::run_deposit;
pub use migrate::run_migrate;
pub use rebalance::run_rebalance;
pub use status::run_status;
pub use withdraw::run_withdraw;

use std::path::Path;

use alloy_primitives::{Address, Bytes, U256};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use tcdp_rs_contracts::{Deployment, TcdpClient};
use tcdp_rs_engine::{
    Operation, OperationRequest, OperationSubmitter, Snapshot, SnapshotReader, Thresholds,
    TxOutcome,
};
use tracing::{debug, info};

use crate::cli::{ConnectionArgs, OutputFormat, SignerArgs};
use crate::output::{format_call_preview, format_tx_outcome};

/// Loads thresholds from a JSON file, or the defaults.
pub fn load_thresholds(path: Option<&Path>) -> Result<Thresholds> {
    let thresholds = match path {
        Some(path) => Thresholds::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Thresholds::default(),
    };
    thresholds.validate().context("Invalid thresholds")?;
    Ok(thresholds)
}

/// Deployment for the selected network, with environment overrides applied.
fn deployment(connection: &ConnectionArgs) -> Result<Deployment> {
    let chain_id = connection.chain.0.chain_id();
    Deployment::for_chain(chain_id)
        .with_context(|| format!("No tCDP deployment for {}", connection.chain))
}

/// Fails unless the node serves the chain the deployment is for.
async fn check_chain(client: &TcdpClient) -> Result<()> {
    let expected = client.deployment().chain_id;
    let actual = client.chain_id().await?;
    if actual != expected {
        bail!(
            "RPC endpoint is on chain {}, but the deployment is for chain {}",
            actual,
            expected
        );
    }
    Ok(())
}

/// Client for view calls only.
pub async fn read_only_client(connection: &ConnectionArgs) -> Result<TcdpClient> {
    let client = TcdpClient::read_only(&connection.rpc_url, deployment(connection)?)?;
    check_chain(&client).await?;
    Ok(client)
}

/// Client that signs with the configured key, and the signer address.
pub async fn signing_client(
    connection: &ConnectionArgs,
    signer: &SignerArgs,
) -> Result<(TcdpClient, Address)> {
    let client = TcdpClient::new(
        &connection.rpc_url,
        &signer.private_key,
        deployment(connection)?,
    )?;
    let account = client
        .signer_address()
        .context("Client has no signer address")?;
    check_chain(&client).await?;
    Ok((client, account))
}

/// Reads the latest snapshot for `account`.
pub async fn read_snapshot(client: &TcdpClient, account: Address) -> Result<Snapshot> {
    let snapshot = client
        .read_snapshot(account)
        .await
        .context("Failed to read on-chain state")?;
    debug!(?snapshot, "snapshot");
    Ok(snapshot)
}

/// Preview of the transaction a dry run would have sent.
#[derive(Debug, Serialize)]
struct CallPreview {
    to: Address,
    data: Bytes,
    value: U256,
}

/// JSON shape of every write command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteReport<'a, P: Serialize> {
    projection: &'a P,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation: Option<OperationRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dry_run: Option<CallPreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction: Option<TxOutcome>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Prints the projection, then previews or submits the operation.
///
/// `operation` is `Err(reason)` when the projection does not allow a write; the
/// command then fails with that reason and nothing is sent.
pub async fn submit<P: Serialize>(
    client: &TcdpClient,
    projection: &P,
    summary: &str,
    operation: std::result::Result<Operation, String>,
    signer: &SignerArgs,
    format: OutputFormat,
    decimals: u8,
) -> Result<()> {
    let mut report = WriteReport {
        projection,
        operation: None,
        error: None,
        dry_run: None,
        transaction: None,
    };

    if format == OutputFormat::Table {
        println!("{}", summary);
    }

    let operation = match operation {
        Ok(operation) => operation,
        Err(reason) => {
            if format == OutputFormat::Json {
                report.error = Some(reason.clone());
                print_json(&report)?;
            }
            bail!(reason);
        }
    };
    report.operation = Some(operation.request());

    if signer.dry_run {
        let call = client.encode(&operation)?;
        match format {
            OutputFormat::Table => {
                println!("\n{}", format_call_preview(&operation, &call, decimals));
            }
            OutputFormat::Json => {
                report.dry_run = Some(CallPreview {
                    to: call.to,
                    data: call.data,
                    value: call.value,
                });
                print_json(&report)?;
            }
        }
        return Ok(());
    }

    if format == OutputFormat::Table {
        println!("\nSubmitting {}...", operation.name());
        println!("Waiting for confirmation...\n");
    }

    let outcome = client
        .submit(&operation)
        .await
        .with_context(|| format!("{} failed", operation.name()))?;
    info!(tx_hash = %outcome.tx_hash, operation = operation.name(), "operation confirmed");

    match format {
        OutputFormat::Table => {
            println!("{}", format_tx_outcome(&outcome, client.deployment().chain_id));
        }
        OutputFormat::Json => {
            report.transaction = Some(outcome);
            print_json(&report)?;
        }
    }
    Ok(())
}

/// Parses a human amount with `decimals` decimals, or `max` to use `max`.
pub fn parse_amount(amount: &str, max: U256, decimals: u8) -> Result<U256> {
    if amount.eq_ignore_ascii_case("max") {
        return Ok(max);
    }
    tcdp_rs_engine::to_raw(amount, decimals)
        .with_context(|| format!("Invalid amount: {}", amount))
}
