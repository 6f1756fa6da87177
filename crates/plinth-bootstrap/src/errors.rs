//! Error types for the bootstrap orchestrator.

use crate::types::BootstrapStep;
use plinth_connectors::ConnectorError;
use thiserror::Error;

/// Errors raised while provisioning a node
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The orchestrator configuration is unusable; no step has run
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A collaborator call failed; the run aborts at the named step
    #[error("step {step} failed: {source}")]
    Collaborator {
        /// Step that was in progress
        step: BootstrapStep,
        /// Underlying collaborator failure
        #[source]
        source: ConnectorError,
    },

    /// An orchestrator invariant was violated
    #[error("bootstrap integrity violation: {0}")]
    Integrity(String),

    /// A cryptographic operation failed
    #[error("crypto operation failed: {0}")]
    Crypto(#[from] plinth_crypto::CryptoError),

    /// Reading or writing the node state file failed
    #[error("node state io error: {0}")]
    Io(#[from] std::io::Error),

    /// The node state document could not be encoded or decoded
    #[error("node state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BootstrapError {
    /// Wrap a collaborator failure with the step it happened in
    pub fn collaborator(step: BootstrapStep, source: ConnectorError) -> Self {
        Self::Collaborator { step, source }
    }

    /// Step a collaborator failure was attributed to, if any
    pub fn step(&self) -> Option<BootstrapStep> {
        match self {
            Self::Collaborator { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, BootstrapError>;
