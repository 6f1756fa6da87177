//! Shared types crossing the collaborator contracts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Algorithm of a key held in vault custody
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    /// Ed25519 signing key
    Ed25519,
    /// ChaCha20-Poly1305 symmetric cipher key
    ChaCha20Poly1305,
}

/// A named key held in vault custody.
///
/// Private material never leaves the vault; asymmetric keys expose their
/// public half, symmetric keys expose nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultKey {
    /// Composite key name (`<owner>/<keyName>`)
    pub name: String,
    /// Key algorithm
    pub key_type: KeyType,
    /// bs58-encoded public key for asymmetric algorithms
    pub public_key: Option<String>,
}

/// Purpose a verification method is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationPurpose {
    /// The method signs assertions made by the identity
    AssertionMethod,
}

impl VerificationPurpose {
    /// Document-level name of the purpose
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::AssertionMethod => "assertionMethod",
        }
    }
}

/// A verification method registered on an identity document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// Method id (`<identity>#<fragment>`)
    pub id: String,
    /// Identity controlling the method
    pub controller: String,
    /// Declared purpose
    pub purpose: VerificationPurpose,
    /// bs58-encoded public key
    pub public_key: String,
}

/// An identity document held by the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDocument {
    /// Decentralized identifier of the document
    pub id: String,
    /// Wallet address the document is anchored to
    pub controller: String,
    /// Registered verification methods
    #[serde(default)]
    pub verification_methods: Vec<VerificationMethod>,
}

/// A wallet address record in the address registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddress {
    /// bs58-encoded address
    pub address: String,
    /// Identity (or bootstrap label) the address belongs to
    pub identity: String,
    /// Account the address was derived under
    pub account: u32,
    /// Derivation index within the account
    pub index: u32,
    /// Current balance in base units
    pub balance: u64,
}

/// An administrative login record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPrincipal {
    /// Record id
    pub id: Uuid,
    /// Login username, email form
    pub username: String,
    /// PHC-formatted Argon2id password hash
    pub password_hash: String,
    /// Salt the hash was derived with
    pub salt: String,
    /// Node identity the principal administers
    pub identity: String,
}
