//! Error types for collaborator implementations.

use thiserror::Error;

/// Errors surfaced by collaborator implementations
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// A named record, secret or key does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A record, secret or key with this name already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The caller passed an invalid name or argument
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The collaborator's backing store failed
    #[error("store failure: {0}")]
    Store(String),

    /// A cryptographic sub-operation failed
    #[error("crypto failure: {0}")]
    Crypto(#[from] plinth_crypto::CryptoError),

    /// An address could not be brought to the requested balance
    #[error("funding failed: {0}")]
    FundingFailed(String),

    /// Any other collaborator failure
    #[error("{0}")]
    Other(String),
}

/// Result type for collaborator operations
pub type Result<T> = std::result::Result<T, ConnectorError>;
