//! Error types for the engine.

use thiserror::Error;

/// Errors raised by the engine itself.
///
/// Missing chain data is never an error: it travels through the engine as `None`.
/// These variants only cover caller misuse and bad configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A function was called with arguments outside its contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Threshold configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reported by the chain-client collaborator.
///
/// The engine never retries; a failed operation is resubmitted only as a fresh user
/// action against a freshly read snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The signer refused to sign or send the transaction
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// The transaction was mined (or simulated) and reverted
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Transport or node failure
    #[error("Network error: {0}")]
    Network(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
