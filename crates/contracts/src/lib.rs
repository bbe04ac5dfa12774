//! Contract bindings and chain client for tokenized CDPs.
//!
//! This crate provides Solidity bindings for the tCDP contract, DAI and the flash
//! migrator, per-chain deployment addresses, and [`TcdpClient`], which implements the
//! engine's `SnapshotReader` and `OperationSubmitter` over alloy.
//!
//! # Example
//!
//! ```no_run
//! use tcdp_rs_contracts::{Deployment, TcdpClient};
//! use tcdp_rs_engine::{evaluate_status, SnapshotReader, Thresholds};
//! use alloy::primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let deployment = Deployment::for_chain(4)?;
//!     let client = TcdpClient::read_only("https://rinkeby.example.org", deployment)?;
//!
//!     let account: Address = "0x0000000000000000000000000000000000000001".parse()?;
//!     let snapshot = client.read_snapshot(account).await?;
//!     let report = evaluate_status(&snapshot, &Thresholds::default());
//!     assert!(report.position.collateral.is_some());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod deployment;
pub mod erc20;
pub mod error;
pub mod prepared_call;
pub mod provider;
pub mod tcdp;

pub use client::{EncodedCall, RateKind, TcdpClient};
pub use deployment::{explorer_link, Deployment, ExplorerTarget, Network};
pub use error::{ContractError, Result};
pub use prepared_call::PreparedCall;
pub use provider::HttpProvider;
