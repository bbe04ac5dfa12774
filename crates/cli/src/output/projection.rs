//! Table formatting for projections and decisions.

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tcdp_rs_engine::{
    math::to_signed, DaiStatus, DepositProjection, MigrationDecision, RebalanceDecision,
    WithdrawProjection,
};

use super::{display_percentage, display_token, yes_no};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(field: &'static str, value: impl Into<String>) -> FieldRow {
    FieldRow {
        field,
        value: value.into(),
    }
}

fn render(rows: Vec<FieldRow>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));
    table.to_string()
}

pub fn format_deposit_projection(projection: &DepositProjection, decimals: u8) -> String {
    let mode = if projection.bootstrap {
        "Initiate (empty pool)"
    } else {
        "Mint"
    };

    let rows = vec![
        row("Mode", mode),
        row("Deposit", display_token(Some(projection.eth_amount), decimals, "ETH")),
        row("Receive DAI", display_token(projection.receive_dai, decimals, "DAI")),
        row("Receive tCDP", display_token(Some(projection.receive_tcdp), decimals, "tCDP")),
        row(
            "Max To Deposit",
            display_token(Some(projection.max_to_deposit), decimals, "ETH"),
        ),
        row("Ether Sufficient", yes_no(projection.ether_sufficient)),
        row("Valid", yes_no(projection.valid)),
    ];
    render(rows)
}

pub fn format_withdraw_projection(projection: &WithdrawProjection, decimals: u8) -> String {
    let rows = vec![
        row("Withdraw", display_token(Some(projection.token_amount), decimals, "tCDP")),
        row("Pay DAI", display_token(Some(projection.pay_dai), decimals, "DAI")),
        row("Receive ETH", display_token(Some(projection.receive_eth), decimals, "ETH")),
        row("tCDP Sufficient", yes_no(projection.token_sufficient)),
        row("DAI Status", dai_status_label(projection.dai_status)),
        row("Valid", yes_no(projection.valid)),
    ];
    render(rows)
}

pub fn format_rebalance_decision(decision: &RebalanceDecision) -> String {
    let action = decision
        .action
        .map_or_else(|| "None".to_string(), |op| op.to_string());
    let rows = vec![
        row("Ratio", display_percentage(decision.ratio.map(to_signed))),
        row("Difference", display_percentage(decision.ratio_difference)),
        row("State", decision.state.to_string()),
        row("Action", action),
    ];
    render(rows)
}

pub fn format_migration_decision(decision: &MigrationDecision) -> String {
    let rows = vec![
        row("Current", decision.current.to_string()),
        row(
            "Compound Funding Rate",
            display_percentage(decision.compound_funding_rate),
        ),
        row(
            "Aave Funding Rate",
            display_percentage(decision.aave_funding_rate),
        ),
        row("Target", decision.target.to_string()),
        row("Ready To Migrate", yes_no(decision.ready_to_migrate)),
    ];
    render(rows)
}

fn dai_status_label(status: DaiStatus) -> &'static str {
    match status {
        DaiStatus::Ok => "OK",
        DaiStatus::InsufficientBalance => "Insufficient balance",
        DaiStatus::InsufficientAllowance => "Insufficient allowance",
    }
}
