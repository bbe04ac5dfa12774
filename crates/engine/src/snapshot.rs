//! Read-side data shapes consumed by the engine.
//!
//! Snapshots come from the chain-client collaborator on every poll. A field that could
//! not be read is `None`; it is never coerced to zero, because zero is a meaningful
//! on-chain value (an empty pool, an empty balance).

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Lending back-end currently holding the pooled position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Compound,
    Aave,
}

impl Protocol {
    /// Maps the tCDP `isCompound()` flag to a protocol.
    pub fn from_is_compound(is_compound: bool) -> Self {
        if is_compound {
            Protocol::Compound
        } else {
            Protocol::Aave
        }
    }

    /// The back-end a migration would move to.
    pub fn other(self) -> Self {
        match self {
            Protocol::Compound => Protocol::Aave,
            Protocol::Aave => Protocol::Compound,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Compound => write!(f, "Compound"),
            Protocol::Aave => write!(f, "Aave"),
        }
    }
}

/// Pooled position as read from chain, with unavailable fields left as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSnapshot {
    /// Ether locked in the back-end (wei)
    pub collateral: Option<U256>,
    /// DAI borrowed from the back-end
    pub debt: Option<U256>,
    /// Outstanding tCDP share tokens
    pub total_supply: Option<U256>,
    /// Oracle price of the debt token in ether (WAD-scaled)
    pub underlying_price: Option<U256>,
}

impl PositionSnapshot {
    /// Returns the complete position, or `None` if collateral, debt or supply is missing.
    pub fn position(&self) -> Option<Position> {
        Some(Position {
            collateral: self.collateral?,
            debt: self.debt?,
            total_supply: self.total_supply?,
            underlying_price: self.underlying_price,
        })
    }
}

/// Pooled position with every field the projectors need.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub collateral: U256,
    pub debt: U256,
    pub total_supply: U256,
    /// The oracle price may still be unavailable; only the bootstrap path needs it
    pub underlying_price: Option<U256>,
}

impl Position {
    /// Create a new position
    pub fn new(
        collateral: U256,
        debt: U256,
        total_supply: U256,
        underlying_price: Option<U256>,
    ) -> Self {
        Self {
            collateral,
            debt,
            total_supply,
            underlying_price,
        }
    }

    /// True for a pool that has never been funded
    pub fn is_uninitialized(&self) -> bool {
        self.collateral.is_zero() && self.debt.is_zero()
    }
}

/// Per-account balances as read from chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshotData {
    pub ether_balance: Option<U256>,
    pub token_balance: Option<U256>,
    pub dai_balance: Option<U256>,
    /// DAI allowance granted to the tCDP contract
    pub dai_allowance: Option<U256>,
}

impl AccountSnapshotData {
    /// Returns the complete account snapshot, or `None` if any balance is missing.
    pub fn complete(&self) -> Option<AccountSnapshot> {
        Some(AccountSnapshot {
            ether_balance: self.ether_balance?,
            token_balance: self.token_balance?,
            dai_balance: self.dai_balance?,
            dai_allowance: self.dai_allowance?,
        })
    }
}

/// Balances of one account, all available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub ether_balance: U256,
    pub token_balance: U256,
    pub dai_balance: U256,
    pub dai_allowance: U256,
}

/// Annual rates of both back-ends, WAD-scaled (1e18 = 100%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    pub compound_dai_apr: Option<U256>,
    pub compound_eth_apr: Option<U256>,
    pub aave_dai_apr: Option<U256>,
    pub aave_eth_apr: Option<U256>,
}

impl RateSnapshot {
    /// Returns `(eth_apr, dai_apr)` for a back-end.
    pub fn aprs(&self, protocol: Protocol) -> (Option<U256>, Option<U256>) {
        match protocol {
            Protocol::Compound => (self.compound_eth_apr, self.compound_dai_apr),
            Protocol::Aave => (self.aave_eth_apr, self.aave_dai_apr),
        }
    }
}

/// Everything one poll returns for an account/contract pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Back-end reported by the tCDP contract
    pub protocol: Option<Protocol>,
    pub position: PositionSnapshot,
    pub account: AccountSnapshotData,
    pub rates: RateSnapshot,
}
