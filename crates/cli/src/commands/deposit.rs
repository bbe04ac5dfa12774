//! Deposit command implementation.

use anyhow::{Context, Result};
use tcdp_rs_engine::{deposit_from_snapshot, max_to_deposit, DepositProjection, Thresholds};

use crate::cli::{DepositArgs, OutputFormat};
use crate::commands::{parse_amount, read_snapshot, signing_client, submit};
use crate::output::{display_token, format_deposit_projection};

/// Why a deposit projection cannot be submitted.
fn rejection(projection: &DepositProjection, decimals: u8) -> String {
    if !projection.ether_sufficient {
        return format!(
            "Insufficient ether: at most {} can be deposited",
            display_token(Some(projection.max_to_deposit), decimals, "ETH")
        );
    }
    if projection.bootstrap && projection.receive_dai.is_none() {
        return "The pool is empty and the DAI price is unavailable to size the initial borrow"
            .to_string();
    }
    if projection.bootstrap {
        return "Deposit is too small to initiate the pool".to_string();
    }
    "Deposit amount must be greater than zero".to_string()
}

pub async fn run_deposit(
    args: &DepositArgs,
    thresholds: &Thresholds,
    format: OutputFormat,
) -> Result<()> {
    let (client, account) = signing_client(&args.connection, &args.signer).await?;
    let snapshot = read_snapshot(&client, account).await?;

    let ether_balance = snapshot
        .account
        .ether_balance
        .context("Ether balance is unavailable")?;
    let decimals = thresholds.base_decimals;
    let eth_amount = parse_amount(
        &args.amount,
        max_to_deposit(ether_balance, thresholds),
        decimals,
    )?;

    let projection = deposit_from_snapshot(&snapshot, eth_amount, thresholds)
        .context("Position or balances are unavailable; try again")?;
    let operation = projection
        .recommended_operation()
        .ok_or_else(|| rejection(&projection, decimals));

    submit(
        &client,
        &projection,
        &format_deposit_projection(&projection, decimals),
        operation,
        &args.signer,
        format,
        decimals,
    )
    .await
}
