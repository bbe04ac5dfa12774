//! Error types for the contracts crate.

use tcdp_rs_engine::ChainError;
use thiserror::Error;

/// Errors that can occur when using the chain client.
#[derive(Debug, Error)]
pub enum ContractError {
    /// RPC connection failed.
    #[error("RPC connection failed: {0}")]
    RpcConnection(String),

    /// Transaction could not be sent or its receipt fetched.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Invalid private key.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Writes need a client created with a private key.
    #[error("No signer configured")]
    NoSigner,

    /// The signer or node refused the transaction.
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// The transaction was mined but reverted.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// No deployment is known for the chain.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    /// An address override could not be parsed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A call needs a contract address the deployment does not have.
    #[error("Missing {0} address for this deployment")]
    MissingAddress(&'static str),
}

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

impl From<ContractError> for ChainError {
    fn from(error: ContractError) -> Self {
        match error {
            ContractError::Rejected(reason) => ChainError::Rejected(reason),
            ContractError::Reverted(reason) => ChainError::Reverted(reason),
            other => ChainError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_rpc_connection() {
        let error = ContractError::RpcConnection("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "RPC connection failed: connection refused"
        );
    }

    #[test]
    fn test_error_display_transaction_failed() {
        let error = ContractError::TransactionFailed("out of gas".to_string());
        assert_eq!(error.to_string(), "Transaction failed: out of gas");
    }

    #[test]
    fn test_error_display_invalid_private_key() {
        let error = ContractError::InvalidPrivateKey;
        assert_eq!(error.to_string(), "Invalid private key");
    }

    #[test]
    fn test_error_display_missing_address() {
        let error = ContractError::MissingAddress("flash migrator");
        assert_eq!(
            error.to_string(),
            "Missing flash migrator address for this deployment"
        );
    }

    #[test]
    fn test_rejected_and_reverted_keep_their_kind() {
        let rejected: ChainError = ContractError::Rejected("user denied".to_string()).into();
        assert_eq!(rejected, ChainError::Rejected("user denied".to_string()));

        let reverted: ChainError = ContractError::Reverted("0xabc".to_string()).into();
        assert_eq!(reverted, ChainError::Reverted("0xabc".to_string()));
    }

    #[test]
    fn test_other_errors_become_network_errors() {
        let error: ChainError = ContractError::RpcConnection("timeout".to_string()).into();
        assert_eq!(
            error,
            ChainError::Network("RPC connection failed: timeout".to_string())
        );
    }
}
