//! Approve command implementation.

use alloy_primitives::U256;
use anyhow::Result;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use tcdp_rs_engine::{Operation, Thresholds};

use crate::cli::{ApproveArgs, OutputFormat};
use crate::commands::{parse_amount, read_snapshot, signing_client, submit};
use crate::output::display_token;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveProjection {
    amount: U256,
    current_allowance: Option<U256>,
    dai_balance: Option<U256>,
}

#[derive(Tabled)]
struct ApproveRow {
    #[tabled(rename = "Approve")]
    amount: String,
    #[tabled(rename = "Current Allowance")]
    current_allowance: String,
    #[tabled(rename = "DAI Balance")]
    dai_balance: String,
}

fn display_allowance(amount: Option<U256>, thresholds: &Thresholds) -> String {
    match amount {
        Some(amount) if amount == thresholds.max_amount => "Unlimited".to_string(),
        other => display_token(other, thresholds.base_decimals, "DAI"),
    }
}

pub async fn run_approve(
    args: &ApproveArgs,
    thresholds: &Thresholds,
    format: OutputFormat,
) -> Result<()> {
    let amount = match args.amount.as_deref() {
        Some(amount) => parse_amount(amount, thresholds.max_amount, thresholds.base_decimals)?,
        None => thresholds.max_amount,
    };

    let (client, account) = signing_client(&args.connection, &args.signer).await?;
    let snapshot = read_snapshot(&client, account).await?;

    let projection = ApproveProjection {
        amount,
        current_allowance: snapshot.account.dai_allowance,
        dai_balance: snapshot.account.dai_balance,
    };
    let row = ApproveRow {
        amount: display_allowance(Some(amount), thresholds),
        current_allowance: display_allowance(projection.current_allowance, thresholds),
        dai_balance: display_token(projection.dai_balance, thresholds.base_decimals, "DAI"),
    };
    let mut table = Table::new(vec![row]);
    table.with(Style::rounded());

    submit(
        &client,
        &projection,
        &table.to_string(),
        Ok(Operation::Approve { amount }),
        &args.signer,
        format,
        thresholds.base_decimals,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcdp_rs_engine::WAD;

    #[test]
    fn test_unlimited_allowance_label() {
        let thresholds = Thresholds::default();
        assert_eq!(display_allowance(Some(U256::MAX), &thresholds), "Unlimited");
        assert_eq!(display_allowance(Some(WAD), &thresholds), "1.0000 DAI");
        assert_eq!(display_allowance(None, &thresholds), "-");

        let six = Thresholds {
            base_decimals: 6,
            ..Thresholds::default()
        };
        let two = display_allowance(Some(U256::from(2_000_000_000_000_000u64)), &six);
        assert_eq!(two, "2000000000.0000 DAI");
    }
}
