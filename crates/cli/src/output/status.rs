//! Detailed output formatting for the position dashboard.

use alloy_primitives::{Address, U256};
use colored::Colorize;
use tcdp_rs_contracts::Network;
use tcdp_rs_engine::{math::to_signed, RatioState, Snapshot, StatusReport, Thresholds};

use super::{display_percentage, display_token, shorten_address};

fn ratio_percentage(raw: Option<U256>) -> String {
    display_percentage(raw.map(to_signed))
}

fn state_label(state: RatioState) -> String {
    match state {
        RatioState::Ok => "OK".green().to_string(),
        RatioState::TooHigh => "Too high".yellow().to_string(),
        RatioState::TooLow => "Too low".red().to_string(),
        RatioState::BootstrapRequired => "Bootstrap required".yellow().to_string(),
        RatioState::Unknown => "Unknown".dimmed().to_string(),
    }
}

pub fn format_status(
    network: Network,
    account: Option<Address>,
    snapshot: &Snapshot,
    report: &StatusReport,
    thresholds: &Thresholds,
) -> String {
    let decimals = thresholds.base_decimals;
    let mut output = String::new();

    // Header
    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("{}\n", format!("tCDP on {}", network).bold()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    // Position
    let protocol = report
        .protocol
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    output.push_str(&format!("{}\n", "Position".cyan().bold()));
    output.push_str(&format!("  Protocol:      {}\n", protocol));
    output.push_str(&format!(
        "  Ether Locked:  {}\n",
        display_token(report.position.collateral, decimals, "ETH")
    ));
    output.push_str(&format!(
        "  Debt:          {}\n",
        display_token(report.position.debt, decimals, "DAI")
    ));
    output.push_str(&format!(
        "  Total Supply:  {}\n",
        display_token(report.position.total_supply, decimals, "tCDP")
    ));
    output.push_str(&format!(
        "  DAI Price:     {}\n\n",
        display_token(report.position.underlying_price, decimals, "ETH")
    ));

    // Collateralization
    let rebalance = &report.rebalance;
    let action = rebalance
        .action
        .map_or_else(|| "None".to_string(), |op| op.to_string());
    output.push_str(&format!("{}\n", "Collateralization".cyan().bold()));
    output.push_str(&format!(
        "  Ratio:         {}\n",
        ratio_percentage(rebalance.ratio)
    ));
    output.push_str(&format!(
        "  Target:        {} ({} - {})\n",
        ratio_percentage(Some(thresholds.ideal_ratio)),
        ratio_percentage(Some(thresholds.lower_ratio)),
        ratio_percentage(Some(thresholds.upper_ratio)),
    ));
    output.push_str(&format!(
        "  Difference:    {}\n",
        display_percentage(rebalance.ratio_difference)
    ));
    output.push_str(&format!("  State:         {}\n", state_label(rebalance.state)));
    output.push_str(&format!("  Rebalance:     {}\n\n", action));

    // Funding rates
    output.push_str(&format!("{}\n", "Funding Rates".cyan().bold()));
    match &report.migration {
        Some(migration) => {
            output.push_str(&format!(
                "  Compound:      {}\n",
                display_percentage(migration.compound_funding_rate)
            ));
            output.push_str(&format!(
                "  Aave:          {}\n",
                display_percentage(migration.aave_funding_rate)
            ));
            let advice = if migration.ready_to_migrate {
                format!("Migrate to {}", migration.target).green().to_string()
            } else {
                format!("Stay on {}", migration.current)
            };
            output.push_str(&format!("  Advice:        {}\n\n", advice));
        }
        None => output.push_str("  Unavailable (active protocol unknown)\n\n"),
    }

    // Account
    if let Some(account) = account {
        let balances = &snapshot.account;
        output.push_str(&format!(
            "{}\n",
            format!("Account {}", shorten_address(&account, 4)).cyan().bold()
        ));
        output.push_str(&format!(
            "  Ether:         {}\n",
            display_token(balances.ether_balance, decimals, "ETH")
        ));
        output.push_str(&format!(
            "  tCDP:          {}\n",
            display_token(balances.token_balance, decimals, "tCDP")
        ));
        output.push_str(&format!(
            "  DAI:           {}\n",
            display_token(balances.dai_balance, decimals, "DAI")
        ));
        output.push_str(&format!(
            "  DAI Allowance: {}\n",
            display_token(balances.dai_allowance, decimals, "DAI")
        ));
        output.push_str(&format!(
            "  Max Deposit:   {}\n",
            display_token(report.max_to_deposit, decimals, "ETH")
        ));
        output.push_str(&format!(
            "  Max Withdraw:  {}\n",
            display_token(report.max_to_withdraw, decimals, "tCDP")
        ));
    }

    output
}
