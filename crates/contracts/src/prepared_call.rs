//! Prepared call types for deferred transaction execution.
//!
//! A `PreparedCall` is a transaction that has been constructed but not yet sent, so the
//! target, value and calldata can be inspected (or printed for a dry run) first.

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol_types::SolCall;
use alloy::transports::TransportError;
use tracing::{debug, info};

use crate::error::{ContractError, Result};
use crate::provider::HttpProvider;

/// EIP-1193 "user rejected request" error code.
const USER_REJECTED_CODE: i64 = 4001;

/// A prepared transaction that can be inspected or executed.
///
/// # Example
///
/// ```rust,ignore
/// // Direct execution
/// let receipt = client.mint(value)?.send().await?;
///
/// // Inspection
/// let (to, call) = client.burn(amount)?.prepare();
/// ```
pub struct PreparedCall<'a, C: SolCall> {
    to: Address,
    call: C,
    value: U256,
    provider: &'a HttpProvider,
}

impl<'a, C: SolCall> PreparedCall<'a, C> {
    /// Create a new prepared call.
    pub fn new(to: Address, call: C, value: U256, provider: &'a HttpProvider) -> Self {
        Self {
            to,
            call,
            value,
            provider,
        }
    }

    /// Consumes self and returns `(address, call)`.
    pub fn prepare(self) -> (Address, C) {
        (self.to, self.call)
    }

    /// Returns the target address for this call.
    pub fn to(&self) -> Address {
        self.to
    }

    /// Returns the value (ETH) to send with this call.
    pub fn value(&self) -> U256 {
        self.value
    }

    /// ABI-encoded calldata, selector first.
    pub fn calldata(&self) -> Vec<u8> {
        self.call.abi_encode()
    }

    /// Sends the transaction and waits for the receipt.
    ///
    /// A receipt with a failed status is reported as [`ContractError::Reverted`].
    pub async fn send(self) -> Result<TransactionReceipt> {
        let tx = TransactionRequest::default()
            .to(self.to)
            .input(self.call.abi_encode().into())
            .value(self.value);

        debug!(to = %self.to, value = %self.value, function = C::SIGNATURE, "sending transaction");

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(classify_send_error)?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending.get_receipt().await.map_err(|e| {
            ContractError::TransactionFailed(format!("Failed to get receipt: {}", e))
        })?;

        if !receipt.status() {
            return Err(ContractError::Reverted(format!(
                "{} reverted in transaction {}",
                C::SIGNATURE,
                tx_hash
            )));
        }

        info!(
            tx_hash = %tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            function = C::SIGNATURE,
            "transaction mined"
        );
        Ok(receipt)
    }
}

fn classify_send_error(error: TransportError) -> ContractError {
    if let Some(payload) = error.as_error_resp() {
        if let Some(classified) = classify_rpc_failure(payload.code, &payload.message) {
            return classified;
        }
    }
    ContractError::TransactionFailed(format!("Failed to send transaction: {}", error))
}

/// Maps a JSON-RPC error response to a rejection or revert, if it is one.
pub(crate) fn classify_rpc_failure(code: i64, message: &str) -> Option<ContractError> {
    if code == USER_REJECTED_CODE {
        return Some(ContractError::Rejected(message.to_string()));
    }
    if message.to_lowercase().contains("revert") {
        return Some(ContractError::Reverted(message.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::read_only_provider;
    use alloy::sol;

    sol! {
        interface ITestContract {
            function testFunction(uint256 value, address receiver) external returns (bool);
        }
    }

    fn test_call() -> ITestContract::testFunctionCall {
        ITestContract::testFunctionCall {
            value: U256::from(100),
            receiver: Address::repeat_byte(0x01),
        }
    }

    #[test]
    fn test_accessors_return_fields() {
        let provider = read_only_provider("http://localhost:8545").unwrap();
        let target = Address::repeat_byte(0x42);
        let value = U256::from(1_000_000_000_000_000_000u64);

        let prepared = PreparedCall::new(target, test_call(), value, &provider);

        assert_eq!(prepared.to(), target);
        assert_eq!(prepared.value(), value);
        assert_eq!(
            &prepared.calldata()[0..4],
            ITestContract::testFunctionCall::SELECTOR.as_slice()
        );
    }

    #[test]
    fn test_prepare_returns_address_and_call_tuple() {
        let provider = read_only_provider("http://localhost:8545").unwrap();
        let target = Address::repeat_byte(0x42);

        let (addr, call) = PreparedCall::new(target, test_call(), U256::ZERO, &provider).prepare();

        assert_eq!(addr, target);
        assert_eq!(call.value, U256::from(100));
        assert_eq!(call.receiver, Address::repeat_byte(0x01));
    }

    #[test]
    fn test_user_rejection_is_classified() {
        let error = classify_rpc_failure(4001, "User denied transaction signature");
        assert!(matches!(error, Some(ContractError::Rejected(_))));
    }

    #[test]
    fn test_revert_is_classified() {
        let error = classify_rpc_failure(3, "execution reverted: not enough collateral");
        assert!(matches!(error, Some(ContractError::Reverted(_))));
    }

    #[test]
    fn test_other_rpc_errors_are_not_classified() {
        assert!(classify_rpc_failure(-32000, "nonce too low").is_none());
    }
}
