//! Write operations the engine can recommend.
//!
//! The engine never sends anything. It hands an [`Operation`] to the caller, who passes it
//! to an [`OperationSubmitter`](crate::collaborator::OperationSubmitter).

use std::fmt;

use alloy_primitives::U256;
use serde::Serialize;

/// A named on-chain write with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// First deposit into an empty pool: borrow `dai_amount` against `value` ether
    Initiate { dai_amount: U256, value: U256 },
    /// Deposit `value` ether and mint tCDP pro rata
    Mint { value: U256 },
    /// Burn `amount` tCDP, repaying DAI and receiving ether
    Burn { amount: U256 },
    /// Approve the tCDP contract to pull `amount` DAI
    Approve { amount: U256 },
    /// Borrow more to bring the ratio down toward the ideal
    Leverage,
    /// Repay debt to bring the ratio up toward the ideal
    Deleverage,
    /// Move the pooled position to the other lending back-end
    FlashMigrate,
}

/// Wire shape of an operation: `{ operation, args, value? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRequest {
    pub operation: &'static str,
    pub args: Vec<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

impl Operation {
    /// Contract-level name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Initiate { .. } => "initiate",
            Operation::Mint { .. } => "mint",
            Operation::Burn { .. } => "burn",
            Operation::Approve { .. } => "approve",
            Operation::Leverage => "leverage",
            Operation::Deleverage => "deleverage",
            Operation::FlashMigrate => "flashMigrate",
        }
    }

    /// Positional call arguments
    pub fn args(&self) -> Vec<U256> {
        match self {
            Operation::Initiate { dai_amount, .. } => vec![*dai_amount],
            Operation::Burn { amount } | Operation::Approve { amount } => vec![*amount],
            Operation::Mint { .. }
            | Operation::Leverage
            | Operation::Deleverage
            | Operation::FlashMigrate => Vec::new(),
        }
    }

    /// Ether attached to the call, if any
    pub fn value(&self) -> Option<U256> {
        match self {
            Operation::Initiate { value, .. } | Operation::Mint { value } => Some(*value),
            _ => None,
        }
    }

    pub fn request(&self) -> OperationRequest {
        OperationRequest {
            operation: self.name(),
            args: self.args(),
            value: self.value(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .args()
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.name(), args)?;
        if let Some(value) = self.value() {
            write!(f, " value={}", value)?;
        }
        Ok(())
    }
}
