//! Node state, step identity and orchestrator configuration.

use crate::errors::{BootstrapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the provisioning saga
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapStep {
    /// Funded identity provisioning
    NodeIdentity,
    /// Administrative login creation
    AdminPrincipal,
    /// Authentication signing key creation
    AuthSigningKey,
    /// Blob-at-rest encryption key creation
    BlobEncryptionKey,
    /// Integrity-proof encryption key creation
    IntegrityEncryptionKey,
    /// Attestation verification method registration
    AttestationVerificationMethod,
    /// Integrity-proof verification method registration
    IntegrityVerificationMethod,
}

impl BootstrapStep {
    /// Execution order of the saga. `NodeIdentity` runs first; every later
    /// step depends on the identity it produces.
    pub const ORDERED: [BootstrapStep; 7] = [
        BootstrapStep::NodeIdentity,
        BootstrapStep::AdminPrincipal,
        BootstrapStep::AuthSigningKey,
        BootstrapStep::BlobEncryptionKey,
        BootstrapStep::IntegrityEncryptionKey,
        BootstrapStep::AttestationVerificationMethod,
        BootstrapStep::IntegrityVerificationMethod,
    ];

    /// Name the step is recorded under in the ledger.
    ///
    /// These strings are part of the persisted state format and must not
    /// change.
    pub fn as_str(&self) -> &'static str {
        match self {
            BootstrapStep::NodeIdentity => "NodeIdentity",
            BootstrapStep::AdminPrincipal => "AdminPrincipal",
            BootstrapStep::AuthSigningKey => "AuthSigningKey",
            BootstrapStep::BlobEncryptionKey => "BlobEncryptionKey",
            BootstrapStep::IntegrityEncryptionKey => "IntegrityEncryptionKey",
            BootstrapStep::AttestationVerificationMethod => "AttestationVerificationMethod",
            BootstrapStep::IntegrityVerificationMethod => "IntegrityVerificationMethod",
        }
    }
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable record of one node's provisioning progress.
///
/// Serialized as a camelCase JSON document. The ledger of completed step
/// names is the single source of truth for what still needs to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeState {
    /// Permanent decentralized identifier, absent until provisioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_identity: Option<String>,

    /// Wallet addresses derived for the node, set alongside the identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,

    /// Ledger of completed step names
    pub bootstrapped_components: Vec<String>,
}

impl NodeState {
    /// Whether a step is recorded as complete
    pub fn is_bootstrapped(&self, step: BootstrapStep) -> bool {
        self.bootstrapped_components
            .iter()
            .any(|name| name == step.as_str())
    }

    /// Record a completed step; recording twice is a no-op
    pub fn record(&mut self, step: BootstrapStep) {
        if !self.is_bootstrapped(step) {
            self.bootstrapped_components.push(step.as_str().to_string());
        }
    }
}

/// Authentication mode of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// The node manages its own login principals
    Native,
    /// Authentication is delegated to an external provider
    External,
}

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Administrative username, email form
    pub admin_username: String,
    /// Authentication mode gating the admin principal step
    pub auth_mode: AuthMode,
    /// Minimum balance the funding address must hold, in base units
    pub min_funding: u64,
    /// Create the blob-at-rest encryption key
    pub enable_blob_encryption: bool,
    /// Create the integrity-proof encryption key
    pub enable_integrity_encryption: bool,
    /// Vault name of the authentication signing key
    pub auth_signing_key_name: String,
    /// Vault name of the blob encryption key
    pub blob_encryption_key_name: String,
    /// Vault name of the integrity encryption key
    pub integrity_encryption_key_name: String,
    /// Fragment registered for the attestation verification method
    pub attestation_method_id: String,
    /// Fragment registered for the integrity-proof verification method
    pub integrity_method_id: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin@node".to_string(),
            auth_mode: AuthMode::Native,
            min_funding: 1_000_000_000,
            enable_blob_encryption: false,
            enable_integrity_encryption: false,
            auth_signing_key_name: "auth-signing".to_string(),
            blob_encryption_key_name: "blob-encryption".to_string(),
            integrity_encryption_key_name: "integrity-encryption".to_string(),
            attestation_method_id: "attestation".to_string(),
            integrity_method_id: "integrity-proof".to_string(),
        }
    }
}

impl BootstrapConfig {
    /// Validate the configuration before any step runs.
    pub fn validate(&self) -> Result<()> {
        if self.auth_mode == AuthMode::Native && self.admin_username.trim().is_empty() {
            return Err(BootstrapError::Configuration(
                "admin username is empty".to_string(),
            ));
        }
        if self.min_funding == 0 {
            return Err(BootstrapError::Configuration(
                "minimum funding must be positive".to_string(),
            ));
        }
        for (field, value) in [
            ("auth signing key name", &self.auth_signing_key_name),
            ("blob encryption key name", &self.blob_encryption_key_name),
            (
                "integrity encryption key name",
                &self.integrity_encryption_key_name,
            ),
            ("attestation method id", &self.attestation_method_id),
            ("integrity method id", &self.integrity_method_id),
        ] {
            if value.trim().is_empty() {
                return Err(BootstrapError::Configuration(format!("{field} is empty")));
            }
        }
        Ok(())
    }
}
