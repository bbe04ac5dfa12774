//! Withdraw command implementation.

use anyhow::{Context, Result};
use tcdp_rs_engine::{
    max_to_withdraw, withdraw_from_snapshot, DaiStatus, Thresholds, WithdrawProjection,
};

use crate::cli::{OutputFormat, WithdrawArgs};
use crate::commands::{parse_amount, read_snapshot, signing_client, submit};
use crate::output::{display_token, format_withdraw_projection};

/// Why a withdraw projection cannot be submitted.
fn rejection(projection: &WithdrawProjection, decimals: u8) -> String {
    if projection.token_amount.is_zero() {
        return "Withdraw amount must be greater than zero".to_string();
    }
    if !projection.token_sufficient {
        return "Insufficient tCDP balance".to_string();
    }
    match projection.dai_status {
        DaiStatus::InsufficientBalance => format!(
            "Insufficient DAI: {} is needed to repay the debt share",
            display_token(Some(projection.pay_dai), decimals, "DAI")
        ),
        DaiStatus::InsufficientAllowance | DaiStatus::Ok => {
            "Withdrawal is not possible with the current balances".to_string()
        }
    }
}

pub async fn run_withdraw(
    args: &WithdrawArgs,
    thresholds: &Thresholds,
    format: OutputFormat,
) -> Result<()> {
    let (client, account) = signing_client(&args.connection, &args.signer).await?;
    let snapshot = read_snapshot(&client, account).await?;

    let balances = snapshot
        .account
        .complete()
        .context("Account balances are unavailable; try again")?;
    let decimals = thresholds.base_decimals;
    let token_amount = parse_amount(&args.amount, max_to_withdraw(&balances), decimals)?;

    let projection = withdraw_from_snapshot(&snapshot, token_amount)
        .context("Position is unavailable; try again")?;

    // Approval comes first and takes this invocation's single write
    let mut summary = format_withdraw_projection(&projection, decimals);
    if projection.dai_status == DaiStatus::InsufficientAllowance {
        summary.push_str("\nDAI allowance is insufficient: approving first.");
        summary.push_str(" Run withdraw again once it is mined.");
    }

    let operation = projection
        .recommended_operation(thresholds)
        .ok_or_else(|| rejection(&projection, decimals));

    submit(
        &client,
        &projection,
        &summary,
        operation,
        &args.signer,
        format,
        decimals,
    )
    .await
}
