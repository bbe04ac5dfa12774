//! tCDP Position Engine
//!
//! This crate projects the effect of depositing into or withdrawing from a tokenized,
//! rebalancing CDP (tCDP) and decides when the pooled position should be rebalanced or
//! migrated between lending back-ends, before any transaction is sent.
//!
//! # Overview
//!
//! The engine allows you to:
//! - Convert between raw token amounts and human decimals without floating point
//! - Project the DAI and tCDP received for an ether deposit, including the first
//!   deposit that initiates an empty pool
//! - Project the DAI owed and ether received for a withdrawal, with balance and
//!   allowance checks
//! - Classify the collateralization ratio and pick the rebalancing write
//! - Compare funding rates across Compound and Aave and recommend a flash migration
//! - Render amounts and percentages for display
//!
//! Every function is pure: the same snapshot and inputs always give the same result.
//! Chain access goes through the [`SnapshotReader`] and [`OperationSubmitter`] traits.
//!
//! # Example
//!
//! ```rust
//! use tcdp_rs_engine::{project_deposit, AccountSnapshot, Operation, Position, Thresholds, WAD};
//! use alloy_primitives::U256;
//!
//! let thresholds = Thresholds::default();
//! let position = Position::new(
//!     U256::from(100) * WAD,   // 100 ETH locked
//!     U256::from(4_000) * WAD, // 4000 DAI borrowed
//!     U256::from(100) * WAD,   // 100 tCDP outstanding
//!     None,
//! );
//! let account = AccountSnapshot {
//!     ether_balance: U256::from(5) * WAD,
//!     ..AccountSnapshot::default()
//! };
//!
//! let projection = project_deposit(WAD, &position, &account, &thresholds);
//! assert_eq!(projection.receive_dai, Some(U256::from(40) * WAD));
//! assert_eq!(projection.recommended_operation(), Some(Operation::Mint { value: WAD }));
//! ```

pub mod collaborator;
pub mod config;
pub mod deposit;
pub mod error;
pub mod format;
pub mod math;
pub mod migration;
pub mod operation;
pub mod ratio;
pub mod snapshot;
pub mod status;
pub mod withdraw;

pub use collaborator::{OperationSubmitter, SnapshotReader, TxOutcome};
pub use config::Thresholds;
pub use error::{ChainError, EngineError, Result};
pub use math::{adaptive_precision, to_human, to_raw, BASE_DECIMALS, WAD};
pub use operation::{Operation, OperationRequest};
pub use snapshot::{
    AccountSnapshot, AccountSnapshotData, Position, PositionSnapshot, Protocol, RateSnapshot,
    Snapshot,
};

// Projection exports
pub use deposit::{max_to_deposit, project_deposit, DepositProjection};
pub use withdraw::{dai_status, max_to_withdraw, project_withdraw, DaiStatus, WithdrawProjection};

// Decision exports
pub use migration::{advise_migration, funding_rate, MigrationDecision};
pub use ratio::{classify, collateral_ratio, decide_rebalance, RatioState, RebalanceDecision};
pub use status::{deposit_from_snapshot, evaluate_status, withdraw_from_snapshot, StatusReport};
