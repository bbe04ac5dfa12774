//! End-to-end flows against in-memory chain collaborators.
//!
//! These tests drive the engine the way a front end does: poll a snapshot, project a
//! user action, and hand the recommended operation to the submitter.

use std::sync::Mutex;

use alloy_primitives::{Address, B256, U256};
use tcdp_rs_engine::{
    deposit_from_snapshot, evaluate_status, withdraw_from_snapshot, AccountSnapshotData,
    ChainError, Operation, OperationSubmitter, PositionSnapshot, Protocol, RateSnapshot,
    RatioState, Snapshot, SnapshotReader, Thresholds, TxOutcome, WAD,
};

const USER: Address = Address::repeat_byte(0x11);

fn ether(n: u64) -> U256 {
    U256::from(n) * WAD
}

/// Reader serving whatever snapshot is currently stored
struct FakeChain {
    snapshot: Mutex<Snapshot>,
}

impl FakeChain {
    fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    fn set(&self, snapshot: Snapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }
}

impl SnapshotReader for FakeChain {
    async fn read_snapshot(&self, account: Address) -> Result<Snapshot, ChainError> {
        assert_eq!(account, USER);
        Ok(*self.snapshot.lock().unwrap())
    }
}

/// Submitter recording every operation and answering with a scripted result
struct RecordingSubmitter {
    submitted: Mutex<Vec<Operation>>,
    failure: Option<ChainError>,
}

impl RecordingSubmitter {
    fn succeeding() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    fn failing(error: ChainError) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    fn submitted(&self) -> Vec<Operation> {
        self.submitted.lock().unwrap().clone()
    }
}

impl OperationSubmitter for RecordingSubmitter {
    async fn submit(&self, operation: &Operation) -> Result<TxOutcome, ChainError> {
        self.submitted.lock().unwrap().push(*operation);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(TxOutcome {
                tx_hash: B256::repeat_byte(0xab),
                block_number: Some(1),
                gas_used: 21_000,
            }),
        }
    }
}

fn funded_snapshot() -> Snapshot {
    Snapshot {
        protocol: Some(Protocol::Aave),
        position: PositionSnapshot {
            collateral: Some(ether(250)),
            debt: Some(ether(100)),
            total_supply: Some(ether(250)),
            underlying_price: Some(WAD / U256::from(200)),
        },
        account: AccountSnapshotData {
            ether_balance: Some(ether(3)),
            token_balance: Some(ether(5)),
            dai_balance: Some(ether(10)),
            dai_allowance: Some(U256::ZERO),
        },
        rates: RateSnapshot {
            compound_dai_apr: Some(WAD / U256::from(10)),
            compound_eth_apr: Some(WAD / U256::from(100)),
            aave_dai_apr: Some(WAD / U256::from(20)),
            aave_eth_apr: Some(WAD / U256::from(100)),
        },
    }
}

#[tokio::test]
async fn test_deposit_flow_submits_mint() {
    let chain = FakeChain::new(funded_snapshot());
    let submitter = RecordingSubmitter::succeeding();
    let thresholds = Thresholds::default();

    let snapshot = chain.read_snapshot(USER).await.unwrap();
    let projection = deposit_from_snapshot(&snapshot, ether(1), &thresholds).unwrap();
    let operation = projection.recommended_operation().unwrap();
    let outcome = submitter.submit(&operation).await.unwrap();

    assert_eq!(outcome.gas_used, 21_000);
    assert_eq!(submitter.submitted(), vec![Operation::Mint { value: ether(1) }]);
}

#[tokio::test]
async fn test_withdraw_flow_approves_before_burn() {
    let chain = FakeChain::new(funded_snapshot());
    let submitter = RecordingSubmitter::succeeding();
    let thresholds = Thresholds::default();

    // 1 tCDP of 250 owes 0.4 DAI; balance covers it but allowance is zero
    let snapshot = chain.read_snapshot(USER).await.unwrap();
    let projection = withdraw_from_snapshot(&snapshot, ether(1)).unwrap();
    let approve = projection.recommended_operation(&thresholds).unwrap();
    assert_eq!(approve, Operation::Approve { amount: U256::MAX });
    submitter.submit(&approve).await.unwrap();

    // The next poll sees the allowance; the projection is recomputed from scratch
    let mut approved = funded_snapshot();
    approved.account.dai_allowance = Some(U256::MAX);
    chain.set(approved);

    let snapshot = chain.read_snapshot(USER).await.unwrap();
    let projection = withdraw_from_snapshot(&snapshot, ether(1)).unwrap();
    let burn = projection.recommended_operation(&thresholds).unwrap();
    submitter.submit(&burn).await.unwrap();

    assert_eq!(
        submitter.submitted(),
        vec![
            Operation::Approve { amount: U256::MAX },
            Operation::Burn { amount: ether(1) },
        ]
    );
}

#[tokio::test]
async fn test_failed_submission_is_not_retried() {
    let chain = FakeChain::new(funded_snapshot());
    let submitter = RecordingSubmitter::failing(ChainError::Reverted("execution reverted".into()));
    let thresholds = Thresholds::default();

    let snapshot = chain.read_snapshot(USER).await.unwrap();
    let operation = deposit_from_snapshot(&snapshot, ether(1), &thresholds)
        .unwrap()
        .recommended_operation()
        .unwrap();

    let result = submitter.submit(&operation).await;
    assert!(matches!(result, Err(ChainError::Reverted(_))));
    assert_eq!(submitter.submitted().len(), 1);
}

#[tokio::test]
async fn test_status_flow_recommends_migration() {
    let chain = FakeChain::new(funded_snapshot());
    let submitter = RecordingSubmitter::succeeding();
    let thresholds = Thresholds::default();

    let snapshot = chain.read_snapshot(USER).await.unwrap();
    let report = evaluate_status(&snapshot, &thresholds);

    // Ratio is exactly ideal
    assert_eq!(report.rebalance.state, RatioState::Ok);
    assert!(report.rebalance.action.is_none());

    // Compound: 1% - 10% / 2.5 = -3%; Aave: 1% - 5% / 2.5 = -1%; already on Aave
    let migration = report.migration.unwrap();
    assert!(!migration.ready_to_migrate);

    // Flip the active back-end: moving to Aave now pays
    let mut on_compound = funded_snapshot();
    on_compound.protocol = Some(Protocol::Compound);
    chain.set(on_compound);

    let snapshot = chain.read_snapshot(USER).await.unwrap();
    let report = evaluate_status(&snapshot, &thresholds);
    let migrate = report.migration.unwrap().recommended_operation().unwrap();
    submitter.submit(&migrate).await.unwrap();

    assert_eq!(submitter.submitted(), vec![Operation::FlashMigrate]);
}

#[tokio::test]
async fn test_bootstrap_flow_initiates_empty_pool() {
    let mut empty = funded_snapshot();
    empty.position = PositionSnapshot {
        collateral: Some(U256::ZERO),
        debt: Some(U256::ZERO),
        total_supply: Some(U256::ZERO),
        underlying_price: Some(WAD / U256::from(200)),
    };
    let chain = FakeChain::new(empty);
    let thresholds = Thresholds::default();

    let snapshot = chain.read_snapshot(USER).await.unwrap();
    assert_eq!(
        evaluate_status(&snapshot, &thresholds).rebalance.state,
        RatioState::BootstrapRequired
    );

    let projection = deposit_from_snapshot(&snapshot, ether(2), &thresholds).unwrap();
    assert_eq!(
        projection.recommended_operation(),
        Some(Operation::Initiate {
            dai_amount: ether(160),
            value: ether(2),
        })
    );
}
