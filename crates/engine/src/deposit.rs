//! Deposit projection.
//!
//! Given a candidate ether deposit, computes what the user would receive. Two paths:
//!
//! - **Mint**: the pool already has supply, so the deposit is split pro rata. Debt and
//!   shares are issued in proportion to `eth_amount / collateral`.
//! - **Initiate**: the pool has less than `DUST` supply. Shares are minted 1:1 with the
//!   deposit and the debt is sized from the oracle price so the position starts at the
//!   ideal ratio.

use alloy_primitives::U256;
use serde::Serialize;
use tracing::debug;

use crate::config::Thresholds;
use crate::math::{mul_div_down, zero_floor_sub, WAD};
use crate::operation::Operation;
use crate::snapshot::{AccountSnapshot, Position};

/// Result of projecting a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositProjection {
    /// Ether the user asked to deposit
    pub eth_amount: U256,
    /// Pool has no meaningful supply yet; the deposit initiates it
    pub bootstrap: bool,
    /// DAI borrowed on the user's behalf. `None` when bootstrapping without an oracle
    /// price, which is an unavailable quote rather than a zero one
    pub receive_dai: Option<U256>,
    /// tCDP minted to the user
    pub receive_tcdp: U256,
    /// Ether balance minus the gas reservation
    pub max_to_deposit: U256,
    pub ether_sufficient: bool,
    pub valid: bool,
}

impl DepositProjection {
    /// The write to submit for this deposit, if it should go ahead.
    ///
    /// An initiate without a DAI quote is never recommended.
    pub fn recommended_operation(&self) -> Option<Operation> {
        if !self.valid {
            return None;
        }
        if self.bootstrap {
            self.receive_dai.map(|dai_amount| Operation::Initiate {
                dai_amount,
                value: self.eth_amount,
            })
        } else {
            Some(Operation::Mint {
                value: self.eth_amount,
            })
        }
    }
}

/// Largest deposit that still leaves the gas reservation in the wallet.
pub fn max_to_deposit(ether_balance: U256, thresholds: &Thresholds) -> U256 {
    zero_floor_sub(ether_balance, thresholds.gas_reservation)
}

/// Projects depositing `eth_amount` wei into the pool.
pub fn project_deposit(
    eth_amount: U256,
    position: &Position,
    account: &AccountSnapshot,
    thresholds: &Thresholds,
) -> DepositProjection {
    let max_to_deposit = max_to_deposit(account.ether_balance, thresholds);
    let bootstrap = position.total_supply < thresholds.dust;
    let ether_sufficient = eth_amount <= max_to_deposit;

    let (receive_dai, receive_tcdp) = if bootstrap {
        (
            initiate_dai(eth_amount, position.underlying_price, thresholds),
            eth_amount,
        )
    } else {
        let receive_dai = mul_div_down(eth_amount, position.debt, position.collateral);
        let receive_tcdp = if !position.collateral.is_zero() && !eth_amount.is_zero() {
            mul_div_down(eth_amount, position.total_supply, position.collateral)
        } else {
            U256::ZERO
        };
        (Some(receive_dai), receive_tcdp)
    };

    let valid = ether_sufficient
        && if bootstrap {
            eth_amount > thresholds.dust
        } else {
            !eth_amount.is_zero()
        };

    debug!(
        %eth_amount,
        bootstrap,
        ?receive_dai,
        %receive_tcdp,
        %max_to_deposit,
        valid,
        "projected deposit"
    );

    DepositProjection {
        eth_amount,
        bootstrap,
        receive_dai,
        receive_tcdp,
        max_to_deposit,
        ether_sufficient,
        valid,
    }
}

/// DAI to borrow when initiating: `(eth / ideal) / price`, kept in 18-decimal units.
fn initiate_dai(
    eth_amount: U256,
    underlying_price: Option<U256>,
    thresholds: &Thresholds,
) -> Option<U256> {
    let price = underlying_price.filter(|p| !p.is_zero())?;
    let eth_at_ideal = mul_div_down(eth_amount, WAD, thresholds.ideal_ratio);
    Some(mul_div_down(eth_at_ideal, WAD, price))
}
