//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors produced by cryptographic operations
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The system random number generator failed
    #[error("random generation failed: {0}")]
    RandomGenerationFailed(String),

    /// A recovery phrase could not be generated or parsed
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// HKDF expansion failed
    #[error("key derivation failed")]
    DerivationFailed,

    /// Password hashing or verification failed
    #[error("password hashing failed: {0}")]
    PasswordHashFailed(String),

    /// A stored password hash is not in PHC format
    #[error("invalid password hash format")]
    InvalidHashFormat,
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;
