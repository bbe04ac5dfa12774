//! Snapshot-level views combining the individual projectors.

use alloy_primitives::U256;
use serde::Serialize;

use crate::config::Thresholds;
use crate::deposit::{max_to_deposit, project_deposit, DepositProjection};
use crate::migration::{advise_migration, MigrationDecision};
use crate::ratio::{decide_rebalance, RebalanceDecision};
use crate::snapshot::{PositionSnapshot, Protocol, Snapshot};
use crate::withdraw::{max_to_withdraw, project_withdraw, WithdrawProjection};

/// Everything the dashboard shows for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub protocol: Option<Protocol>,
    pub position: PositionSnapshot,
    pub rebalance: RebalanceDecision,
    /// `None` when the active back-end could not be read
    pub migration: Option<MigrationDecision>,
    pub max_to_deposit: Option<U256>,
    pub max_to_withdraw: Option<U256>,
}

pub fn evaluate_status(snapshot: &Snapshot, thresholds: &Thresholds) -> StatusReport {
    let account = snapshot.account.complete();
    StatusReport {
        protocol: snapshot.protocol,
        position: snapshot.position,
        rebalance: decide_rebalance(&snapshot.position, thresholds),
        migration: snapshot
            .protocol
            .map(|current| advise_migration(current, &snapshot.rates, thresholds)),
        max_to_deposit: snapshot
            .account
            .ether_balance
            .map(|balance| max_to_deposit(balance, thresholds)),
        max_to_withdraw: account.as_ref().map(max_to_withdraw),
    }
}

/// Deposit projection against a snapshot, `None` if position or balances are incomplete.
pub fn deposit_from_snapshot(
    snapshot: &Snapshot,
    eth_amount: U256,
    thresholds: &Thresholds,
) -> Option<DepositProjection> {
    let position = snapshot.position.position()?;
    let account = snapshot.account.complete()?;
    Some(project_deposit(eth_amount, &position, &account, thresholds))
}

/// Withdraw projection against a snapshot, `None` if position or balances are incomplete.
pub fn withdraw_from_snapshot(
    snapshot: &Snapshot,
    token_amount: U256,
) -> Option<WithdrawProjection> {
    let position = snapshot.position.position()?;
    let account = snapshot.account.complete()?;
    Some(project_withdraw(token_amount, &position, &account))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::WAD;
    use crate::ratio::RatioState;
    use crate::snapshot::{AccountSnapshotData, RateSnapshot};

    fn ether(n: u64) -> U256 {
        U256::from(n) * WAD
    }

    fn full_snapshot() -> Snapshot {
        Snapshot {
            protocol: Some(Protocol::Compound),
            position: PositionSnapshot {
                collateral: Some(ether(300)),
                debt: Some(ether(100)),
                total_supply: Some(ether(300)),
                underlying_price: Some(WAD / U256::from(200)),
            },
            account: AccountSnapshotData {
                ether_balance: Some(ether(2)),
                token_balance: Some(ether(1)),
                dai_balance: Some(ether(10)),
                dai_allowance: Some(U256::ZERO),
            },
            rates: RateSnapshot {
                compound_dai_apr: Some(U256::ZERO),
                compound_eth_apr: Some(WAD / U256::from(20)),
                aave_dai_apr: Some(U256::ZERO),
                aave_eth_apr: Some(WAD / U256::from(10)),
            },
        }
    }

    #[test]
    fn test_status_combines_decisions() {
        let thresholds = Thresholds::default();
        let report = evaluate_status(&full_snapshot(), &thresholds);
        assert_eq!(report.rebalance.state, RatioState::TooHigh);
        assert!(report.migration.unwrap().ready_to_migrate);
        assert_eq!(
            report.max_to_deposit,
            Some(ether(2) - thresholds.gas_reservation)
        );
        assert_eq!(report.max_to_withdraw, Some(ether(1)));
    }

    #[test]
    fn test_status_without_protocol_skips_migration() {
        let snapshot = Snapshot {
            protocol: None,
            ..full_snapshot()
        };
        let report = evaluate_status(&snapshot, &Thresholds::default());
        assert!(report.migration.is_none());
    }

    #[test]
    fn test_status_of_empty_snapshot_is_unknown() {
        let report = evaluate_status(&Snapshot::default(), &Thresholds::default());
        assert_eq!(report.rebalance.state, RatioState::Unknown);
        assert_eq!(report.max_to_deposit, None);
        assert_eq!(report.max_to_withdraw, None);
    }

    #[test]
    fn test_projections_require_complete_snapshot() {
        let thresholds = Thresholds::default();
        let mut snapshot = full_snapshot();
        assert!(deposit_from_snapshot(&snapshot, ether(1), &thresholds).is_some());
        assert!(withdraw_from_snapshot(&snapshot, ether(1)).is_some());

        snapshot.account.dai_allowance = None;
        assert!(deposit_from_snapshot(&snapshot, ether(1), &thresholds).is_none());
        assert!(withdraw_from_snapshot(&snapshot, ether(1)).is_none());
    }
}
