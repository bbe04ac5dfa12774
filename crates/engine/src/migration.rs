//! Cross-protocol migration advice.
//!
//! The pool earns the ether supply rate on its collateral and pays the DAI borrow rate on
//! a debt worth `1 / ideal` of that collateral, so the net rate of a back-end is
//!
//! ```text
//! funding_rate = eth_apr - dai_apr / ideal_ratio
//! ```
//!
//! Migration is recommended when the other back-end's funding rate is strictly higher.
//! The move itself is a single flash-migration call owned by the chain; the engine only
//! decides whether to make it.

use alloy_primitives::{I256, U256};
use serde::Serialize;
use tracing::debug;

use crate::config::Thresholds;
use crate::math::{to_signed, w_div_down};
use crate::operation::Operation;
use crate::snapshot::{Protocol, RateSnapshot};

/// Migration recommendation for one rate snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationDecision {
    pub current: Protocol,
    pub target: Protocol,
    /// Net rate on Compound (WAD-scaled, may be negative)
    pub compound_funding_rate: Option<I256>,
    /// Net rate on Aave (WAD-scaled, may be negative)
    pub aave_funding_rate: Option<I256>,
    pub ready_to_migrate: bool,
}

impl MigrationDecision {
    /// Funding rate of the back-end currently in use
    pub fn current_rate(&self) -> Option<I256> {
        self.rate_of(self.current)
    }

    /// Funding rate of the back-end a migration would move to
    pub fn target_rate(&self) -> Option<I256> {
        self.rate_of(self.target)
    }

    pub fn rate_of(&self, protocol: Protocol) -> Option<I256> {
        match protocol {
            Protocol::Compound => self.compound_funding_rate,
            Protocol::Aave => self.aave_funding_rate,
        }
    }

    /// `flashMigrate`, only when migration is worthwhile.
    pub fn recommended_operation(&self) -> Option<Operation> {
        self.ready_to_migrate.then_some(Operation::FlashMigrate)
    }
}

/// Net funding rate of a back-end: `eth_apr - dai_apr / ideal_ratio`.
///
/// `None` if either APR is unavailable.
pub fn funding_rate(
    eth_apr: Option<U256>,
    dai_apr: Option<U256>,
    thresholds: &Thresholds,
) -> Option<I256> {
    let eth_apr = to_signed(eth_apr?);
    let dai_cost = to_signed(w_div_down(dai_apr?, thresholds.ideal_ratio));
    Some(eth_apr.saturating_sub(dai_cost))
}

/// Compares both back-ends and decides whether to leave `current`.
pub fn advise_migration(
    current: Protocol,
    rates: &RateSnapshot,
    thresholds: &Thresholds,
) -> MigrationDecision {
    let (compound_eth, compound_dai) = rates.aprs(Protocol::Compound);
    let (aave_eth, aave_dai) = rates.aprs(Protocol::Aave);
    let compound_funding_rate = funding_rate(compound_eth, compound_dai, thresholds);
    let aave_funding_rate = funding_rate(aave_eth, aave_dai, thresholds);

    let mut decision = MigrationDecision {
        current,
        target: current.other(),
        compound_funding_rate,
        aave_funding_rate,
        ready_to_migrate: false,
    };
    decision.ready_to_migrate = match (decision.current_rate(), decision.target_rate()) {
        (Some(current_rate), Some(target_rate)) => target_rate > current_rate,
        _ => false,
    };

    debug!(
        %current,
        ?compound_funding_rate,
        ?aave_funding_rate,
        ready = decision.ready_to_migrate,
        "advised migration"
    );

    decision
}
