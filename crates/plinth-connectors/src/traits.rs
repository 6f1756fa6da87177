//! Collaborator contracts consumed by the bootstrap orchestrator.
//!
//! Every contract is async and object safe. Lookup operations return
//! `Ok(None)` for absent records; `NotFound` errors are reserved for
//! operations that require the record to exist.

use crate::errors::Result;
use crate::types::{
    AdminPrincipal, IdentityDocument, KeyType, VaultKey, VerificationMethod, VerificationPurpose,
    WalletAddress,
};
use async_trait::async_trait;
use serde_json::Value;

/// Secret and key custody
#[async_trait]
pub trait VaultConnector: Send + Sync {
    /// Store a named secret, overwriting any existing value
    async fn set_secret(&self, name: &str, value: &str) -> Result<()>;

    /// Remove a named secret; an absent name is a `NotFound` error
    async fn remove_secret(&self, name: &str) -> Result<()>;

    /// Fetch a named secret
    async fn get_secret(&self, name: &str) -> Result<Option<String>>;

    /// Create a named key; an already-taken name is an `AlreadyExists` error
    async fn create_key(&self, name: &str, key_type: KeyType) -> Result<VaultKey>;

    /// Fetch a named key
    async fn get_key(&self, name: &str) -> Result<Option<VaultKey>>;
}

/// Custody wallet over vault-held recovery material
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Derive `count` addresses for an owner, starting at `start_index`
    async fn get_addresses(
        &self,
        owner: &str,
        account: u32,
        start_index: u32,
        count: u32,
    ) -> Result<Vec<String>>;

    /// Ensure an address holds at least `minimum` base units
    async fn ensure_balance(&self, owner: &str, address: &str, minimum: u64) -> Result<()>;
}

/// Decentralized identity registry
#[async_trait]
pub trait IdentityConnector: Send + Sync {
    /// Create a new identity document anchored to a wallet address
    async fn create_document(&self, controller: &str) -> Result<IdentityDocument>;

    /// Register a verification method on an existing document
    async fn add_verification_method(
        &self,
        identity: &str,
        controller: &str,
        purpose: VerificationPurpose,
        method_id: &str,
    ) -> Result<VerificationMethod>;
}

/// Identity profile documents, split into public and private halves
#[async_trait]
pub trait ProfileConnector: Send + Sync {
    /// Create the profile for an identity; a second create is an error
    async fn create(&self, identity: &str, public: Value, private: Value) -> Result<()>;
}

/// Address-ownership registry backing a registry-backed wallet
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Fetch an address record
    async fn get(&self, address: &str) -> Result<Option<WalletAddress>>;

    /// Insert or replace an address record
    async fn set(&self, record: WalletAddress) -> Result<()>;
}

/// Login principal store
#[async_trait]
pub trait LoginConnector: Send + Sync {
    /// Insert or replace a login principal
    async fn set(&self, principal: AdminPrincipal) -> Result<()>;

    /// Fetch a principal by username
    async fn get(&self, username: &str) -> Result<Option<AdminPrincipal>>;
}
