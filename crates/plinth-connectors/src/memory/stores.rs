//! In-memory entity stores for addresses, logins and profiles.

use crate::errors::{ConnectorError, Result};
use crate::traits::{AddressStore, LoginConnector, ProfileConnector};
use crate::types::{AdminPrincipal, WalletAddress};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`AddressStore`] implementation.
pub struct MemoryAddressStore {
    records: RwLock<HashMap<String, WalletAddress>>,
}

impl MemoryAddressStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryAddressStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressStore for MemoryAddressStore {
    async fn get(&self, address: &str) -> Result<Option<WalletAddress>> {
        Ok(self.records.read().await.get(address).cloned())
    }

    async fn set(&self, record: WalletAddress) -> Result<()> {
        if record.address.is_empty() {
            return Err(ConnectorError::InvalidInput("address is empty".to_string()));
        }
        self.records
            .write()
            .await
            .insert(record.address.clone(), record);
        Ok(())
    }
}

/// In-memory [`LoginConnector`] implementation.
pub struct MemoryLoginStore {
    principals: RwLock<HashMap<String, AdminPrincipal>>,
}

impl MemoryLoginStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            principals: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryLoginStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoginConnector for MemoryLoginStore {
    async fn set(&self, principal: AdminPrincipal) -> Result<()> {
        if principal.username.is_empty() {
            return Err(ConnectorError::InvalidInput("username is empty".to_string()));
        }
        self.principals
            .write()
            .await
            .insert(principal.username.clone(), principal);
        Ok(())
    }

    async fn get(&self, username: &str) -> Result<Option<AdminPrincipal>> {
        Ok(self.principals.read().await.get(username).cloned())
    }
}

/// In-memory [`ProfileConnector`] implementation.
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, (Value, Value)>>,
}

impl MemoryProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the stored profile halves for an identity
    pub async fn profile(&self, identity: &str) -> Option<(Value, Value)> {
        self.profiles.read().await.get(identity).cloned()
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileConnector for MemoryProfileStore {
    async fn create(&self, identity: &str, public: Value, private: Value) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(identity) {
            return Err(ConnectorError::AlreadyExists(format!("profile {identity}")));
        }
        profiles.insert(identity.to_string(), (public, private));
        Ok(())
    }
}
