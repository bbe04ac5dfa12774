//! Interfaces to the chain client.
//!
//! The engine reads state and submits writes through two narrow traits so that any chain
//! SDK can back it. `tcdp-rs-contracts` provides the alloy implementation; tests use
//! in-memory fakes.

use std::future::Future;

use alloy_primitives::{Address, B256};
use serde::Serialize;

use crate::error::ChainError;
use crate::operation::Operation;
use crate::snapshot::Snapshot;

/// Receipt details of a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Polls the latest on-chain state for an account.
pub trait SnapshotReader {
    /// Reads position, balances and rates. Fields that fail to load come back as `None`;
    /// an `Err` means nothing could be read at all.
    fn read_snapshot(
        &self,
        account: Address,
    ) -> impl Future<Output = Result<Snapshot, ChainError>> + Send;
}

/// Sends a write operation and waits for it to be mined.
pub trait OperationSubmitter {
    fn submit(
        &self,
        operation: &Operation,
    ) -> impl Future<Output = Result<TxOutcome, ChainError>> + Send;
}
