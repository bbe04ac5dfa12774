//! Output formatting for CLI results.

pub mod projection;
pub mod status;
pub mod transaction;

use alloy_primitives::{Address, B256, I256, U256};
use tcdp_rs_engine::format::{self, DEFAULT_AMOUNT_DECIMALS, DEFAULT_PERCENTAGE_DECIMALS};
use tcdp_rs_engine::BASE_DECIMALS;

pub use projection::{
    format_deposit_projection, format_migration_decision, format_rebalance_decision,
    format_withdraw_projection,
};
pub use status::format_status;
pub use transaction::{format_call_preview, format_tx_outcome};

/// `0x1234...abcd`, keeping `digits` hex characters on each side.
pub fn shorten_address(address: &Address, digits: usize) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..digits + 2], &full[42 - digits..])
}

/// `0x123456...abcdef`, keeping `digits` hex characters on each side.
pub fn shorten_hash(hash: &B256, digits: usize) -> String {
    let full = format!("{:#x}", hash);
    format!("{}...{}", &full[..digits + 2], &full[66 - digits..])
}

/// Raw amount with `decimals` decimals for display, `-` when unavailable.
pub fn display_amount(raw: Option<U256>, decimals: u8) -> String {
    format::amount(raw, decimals, DEFAULT_AMOUNT_DECIMALS.min(decimals))
        .ok()
        .flatten()
        .unwrap_or_else(|| "-".to_string())
}

/// Amount with a unit suffix, e.g. `1.0000 ETH`.
pub fn display_token(raw: Option<U256>, decimals: u8, unit: &str) -> String {
    match raw {
        Some(_) => format!("{} {}", display_amount(raw, decimals), unit),
        None => "-".to_string(),
    }
}

/// WAD fraction as a percentage, `-` when unavailable.
///
/// Ratios and rates are WAD-scaled whatever the token decimals are.
pub fn display_percentage(raw: Option<I256>) -> String {
    format::percentage(raw, BASE_DECIMALS, DEFAULT_PERCENTAGE_DECIMALS)
        .ok()
        .flatten()
        .unwrap_or_else(|| "-".to_string())
}

/// Format gas with thousands separators.
pub fn format_gas(gas: u64) -> String {
    let s = gas.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use tcdp_rs_engine::WAD;

    #[test]
    fn test_shorten_address() {
        let addr = address!("ae5e23e7c1820E10c8aB850B456D36aED6225bff");
        assert_eq!(shorten_address(&addr, 4).to_lowercase(), "0xae5e...5bff");
    }

    #[test]
    fn test_shorten_hash() {
        let hash = B256::repeat_byte(0xab);
        assert_eq!(shorten_hash(&hash, 6), "0xababab...ababab");
    }

    #[test]
    fn test_display_amount() {
        assert_eq!(display_amount(Some(WAD), 18), "1.0000");
        assert_eq!(display_amount(Some(U256::ZERO), 18), "0");
        assert_eq!(display_amount(None, 18), "-");
        assert_eq!(display_token(Some(WAD), 18, "ETH"), "1.0000 ETH");
        assert_eq!(display_token(None, 18, "ETH"), "-");
    }

    #[test]
    fn test_display_amount_follows_decimals() {
        // Seven raw digits still get the adaptive small-value precision
        assert_eq!(display_amount(Some(U256::from(1_500_000)), 6), "1.5000000000000");
        let two_billion = U256::from(2_000_000_000_000_000u64);
        assert_eq!(display_token(Some(two_billion), 6, "DAI"), "2000000000.0000 DAI");
    }

    #[test]
    fn test_display_percentage() {
        let five_percent = I256::from_raw(WAD / U256::from(20));
        assert_eq!(display_percentage(Some(five_percent)), "5.00 %");
        assert_eq!(display_percentage(None), "-");
    }

    #[test]
    fn test_format_gas() {
        assert_eq!(format_gas(21_000), "21,000");
        assert_eq!(format_gas(999), "999");
        assert_eq!(format_gas(1_234_567), "1,234,567");
    }
}
