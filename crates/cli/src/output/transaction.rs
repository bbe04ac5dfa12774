//! Formatting for submitted and previewed transactions.

use colored::Colorize;
use tcdp_rs_contracts::{explorer_link, EncodedCall, ExplorerTarget};
use tcdp_rs_engine::{Operation, TxOutcome};

use super::{display_amount, format_gas, shorten_hash};

/// Dry-run view of an operation and the transaction it would send.
pub fn format_call_preview(operation: &Operation, call: &EncodedCall, decimals: u8) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Dry Run".cyan().bold()));
    output.push_str(&format!("  Operation: {}\n", operation));
    output.push_str(&format!("  To:        {}\n", call.to));
    output.push_str(&format!(
        "  Value:     {} ETH\n",
        display_amount(Some(call.value), decimals)
    ));
    output.push_str(&format!("  Calldata:  {}\n", call.data));

    output
}

/// Confirmation of a mined transaction with an explorer link.
pub fn format_tx_outcome(outcome: &TxOutcome, chain_id: u64) -> String {
    let mut output = String::new();
    let hash = format!("{:#x}", outcome.tx_hash);

    output.push_str(&format!("{}\n", "Transaction confirmed!".green().bold()));
    output.push_str(&format!("  Tx Hash:   {}\n", shorten_hash(&outcome.tx_hash, 6)));
    output.push_str(&format!(
        "  Block:     {}\n",
        outcome
            .block_number
            .map_or_else(|| "-".to_string(), |b| b.to_string())
    ));
    output.push_str(&format!("  Gas Used:  {}\n", format_gas(outcome.gas_used)));
    output.push_str(&format!(
        "  Explorer:  {}\n",
        explorer_link(chain_id, &hash, ExplorerTarget::Transaction)
    ));

    output
}
