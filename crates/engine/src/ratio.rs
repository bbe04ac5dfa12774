//! Collateralization ratio monitoring.
//!
//! The pool targets an ideal collateral/debt ratio and is rebalanced once the ratio
//! leaves the band `[lower, upper]`. Classification is a pure function of the latest
//! snapshot; nothing is remembered between polls.
//!
//! ```text
//! collateral or debt unavailable  -> Unknown
//! debt == 0                       -> BootstrapRequired
//! ratio > upper                   -> TooHigh  -> leverage()
//! ratio < lower                   -> TooLow   -> deleverage()
//! otherwise                       -> Ok
//! ```

use std::fmt;

use alloy_primitives::{I256, U256};
use serde::Serialize;
use tracing::debug;

use crate::config::Thresholds;
use crate::math::{to_signed, w_div_down};
use crate::operation::Operation;
use crate::snapshot::PositionSnapshot;

/// Classification of the pool's collateralization ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatioState {
    /// No debt yet, so the ratio is undefined; the pool must be initiated
    BootstrapRequired,
    TooHigh,
    TooLow,
    Ok,
    /// Collateral or debt could not be read
    Unknown,
}

impl RatioState {
    /// Rebalancing write for this state, if any.
    pub fn action(self) -> Option<Operation> {
        match self {
            RatioState::TooHigh => Some(Operation::Leverage),
            RatioState::TooLow => Some(Operation::Deleverage),
            RatioState::Ok | RatioState::BootstrapRequired | RatioState::Unknown => None,
        }
    }

    pub fn is_rebalance_ready(self) -> bool {
        self.action().is_some()
    }
}

impl fmt::Display for RatioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RatioState::BootstrapRequired => "BOOTSTRAP_REQUIRED",
            RatioState::TooHigh => "TOO_HIGH",
            RatioState::TooLow => "TOO_LOW",
            RatioState::Ok => "OK",
            RatioState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// Rebalance recommendation for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceDecision {
    pub state: RatioState,
    /// Collateral/debt (WAD-scaled), when defined
    pub ratio: Option<U256>,
    /// `ratio - ideal` (WAD-scaled), when the ratio is defined
    pub ratio_difference: Option<I256>,
    #[serde(skip)]
    pub action: Option<Operation>,
}

/// Collateral/debt as a WAD fraction. `None` when either side is unavailable or the
/// debt is zero.
pub fn collateral_ratio(snapshot: &PositionSnapshot) -> Option<U256> {
    let collateral = snapshot.collateral?;
    let debt = snapshot.debt.filter(|d| !d.is_zero())?;
    Some(w_div_down(collateral, debt))
}

/// Classifies the ratio of a snapshot against the threshold band.
pub fn classify(snapshot: &PositionSnapshot, thresholds: &Thresholds) -> RatioState {
    let (Some(collateral), Some(debt)) = (snapshot.collateral, snapshot.debt) else {
        return RatioState::Unknown;
    };
    if debt.is_zero() {
        return RatioState::BootstrapRequired;
    }

    let ratio = w_div_down(collateral, debt);
    if ratio > thresholds.upper_ratio {
        RatioState::TooHigh
    } else if ratio < thresholds.lower_ratio {
        RatioState::TooLow
    } else {
        RatioState::Ok
    }
}

/// Classifies the snapshot and attaches the ratio, its distance from the ideal, and the
/// rebalancing write.
pub fn decide_rebalance(snapshot: &PositionSnapshot, thresholds: &Thresholds) -> RebalanceDecision {
    let state = classify(snapshot, thresholds);
    let ratio = collateral_ratio(snapshot);
    let ratio_difference =
        ratio.map(|r| to_signed(r).saturating_sub(to_signed(thresholds.ideal_ratio)));

    debug!(%state, ?ratio, "classified collateralization ratio");

    RebalanceDecision {
        state,
        ratio,
        ratio_difference,
        action: state.action(),
    }
}
