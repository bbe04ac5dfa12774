//! Withdraw projection.
//!
//! Burning tCDP repays a pro-rata share of the pool's DAI debt and releases the same
//! share of its ether collateral. The user must hold and have approved enough DAI.

use std::fmt;

use alloy_primitives::U256;
use serde::Serialize;
use tracing::debug;

use crate::config::Thresholds;
use crate::math::mul_div_down;
use crate::operation::Operation;
use crate::snapshot::{AccountSnapshot, Position};

/// Whether the user can cover the DAI repayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DaiStatus {
    Ok,
    /// Not enough DAI in the wallet. Reported before any allowance shortfall
    InsufficientBalance,
    /// Enough DAI, but the tCDP contract is not approved to pull it
    InsufficientAllowance,
}

impl fmt::Display for DaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaiStatus::Ok => write!(f, "OK"),
            DaiStatus::InsufficientBalance => write!(f, "INSUFFICIENT_BALANCE"),
            DaiStatus::InsufficientAllowance => write!(f, "INSUFFICIENT_ALLOWANCE"),
        }
    }
}

/// Result of projecting a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawProjection {
    /// tCDP the user asked to burn
    pub token_amount: U256,
    /// DAI the user must repay
    pub pay_dai: U256,
    /// Ether released to the user
    pub receive_eth: U256,
    pub token_sufficient: bool,
    pub dai_status: DaiStatus,
    pub valid: bool,
}

impl WithdrawProjection {
    /// The write to submit next: an unlimited approval if the allowance is short,
    /// otherwise the burn itself when the withdrawal is valid.
    pub fn recommended_operation(&self, thresholds: &Thresholds) -> Option<Operation> {
        if self.dai_status == DaiStatus::InsufficientAllowance {
            return Some(Operation::Approve {
                amount: thresholds.max_amount,
            });
        }
        if self.valid {
            return Some(Operation::Burn {
                amount: self.token_amount,
            });
        }
        None
    }
}

/// Largest withdrawal the account can request: its whole tCDP balance.
pub fn max_to_withdraw(account: &AccountSnapshot) -> U256 {
    account.token_balance
}

/// Classifies the user's DAI against the required repayment.
pub fn dai_status(pay_dai: U256, account: &AccountSnapshot) -> DaiStatus {
    if account.dai_balance < pay_dai {
        DaiStatus::InsufficientBalance
    } else if account.dai_allowance < pay_dai {
        DaiStatus::InsufficientAllowance
    } else {
        DaiStatus::Ok
    }
}

/// Projects burning `token_amount` tCDP.
pub fn project_withdraw(
    token_amount: U256,
    position: &Position,
    account: &AccountSnapshot,
) -> WithdrawProjection {
    let has_share = !position.total_supply.is_zero() && !token_amount.is_zero();
    let (pay_dai, receive_eth) = if has_share {
        (
            mul_div_down(token_amount, position.debt, position.total_supply),
            mul_div_down(token_amount, position.collateral, position.total_supply),
        )
    } else {
        (U256::ZERO, U256::ZERO)
    };

    let token_sufficient = token_amount <= account.token_balance;
    let dai_status = dai_status(pay_dai, account);
    let valid = !token_amount.is_zero() && token_sufficient && dai_status == DaiStatus::Ok;

    debug!(
        %token_amount,
        %pay_dai,
        %receive_eth,
        %dai_status,
        valid,
        "projected withdraw"
    );

    WithdrawProjection {
        token_amount,
        pay_dai,
        receive_eth,
        token_sufficient,
        dai_status,
        valid,
    }
}
