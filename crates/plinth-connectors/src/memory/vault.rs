//! In-memory secret and key custody.

use crate::errors::{ConnectorError, Result};
use crate::traits::VaultConnector;
use crate::types::{KeyType, VaultKey};
use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use rand::RngCore;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Material held for one vault key. Private bytes stay inside the vault.
struct KeyEntry {
    key_type: KeyType,
    public_key: Option<String>,
    #[allow(dead_code)]
    private_key: [u8; 32],
}

impl KeyEntry {
    fn generate(key_type: KeyType) -> Result<Self> {
        let mut material = [0u8; 32];
        rand::thread_rng()
            .try_fill_bytes(&mut material)
            .map_err(|e| ConnectorError::Other(format!("random generation failed: {e}")))?;
        let public_key = match key_type {
            KeyType::Ed25519 => {
                let key = SigningKey::from_bytes(&material);
                Some(bs58::encode(key.verifying_key().to_bytes()).into_string())
            }
            KeyType::ChaCha20Poly1305 => None,
        };
        Ok(Self {
            key_type,
            public_key,
            private_key: material,
        })
    }
}

/// In-memory [`VaultConnector`] implementation.
pub struct MemoryVault {
    secrets: RwLock<HashMap<String, String>>,
    keys: RwLock<HashMap<String, KeyEntry>>,
}

impl MemoryVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored secrets
    pub async fn secret_count(&self) -> usize {
        self.secrets.read().await.len()
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VaultConnector for MemoryVault {
    async fn set_secret(&self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ConnectorError::InvalidInput("secret name is empty".to_string()));
        }
        self.secrets
            .write()
            .await
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_secret(&self, name: &str) -> Result<()> {
        self.secrets
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ConnectorError::NotFound(format!("secret {name}")))
    }

    async fn get_secret(&self, name: &str) -> Result<Option<String>> {
        Ok(self.secrets.read().await.get(name).cloned())
    }

    async fn create_key(&self, name: &str, key_type: KeyType) -> Result<VaultKey> {
        if name.is_empty() {
            return Err(ConnectorError::InvalidInput("key name is empty".to_string()));
        }
        let mut keys = self.keys.write().await;
        if keys.contains_key(name) {
            return Err(ConnectorError::AlreadyExists(format!("key {name}")));
        }
        let entry = KeyEntry::generate(key_type)?;
        let key = VaultKey {
            name: name.to_string(),
            key_type,
            public_key: entry.public_key.clone(),
        };
        keys.insert(name.to_string(), entry);
        Ok(key)
    }

    async fn get_key(&self, name: &str) -> Result<Option<VaultKey>> {
        Ok(self.keys.read().await.get(name).map(|entry| VaultKey {
            name: name.to_string(),
            key_type: entry.key_type,
            public_key: entry.public_key.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn secrets_roundtrip_and_remove() {
        let vault = MemoryVault::new();
        vault.set_secret("owner/mnemonic", "phrase").await.unwrap();
        assert_eq!(
            vault.get_secret("owner/mnemonic").await.unwrap().as_deref(),
            Some("phrase")
        );

        vault.remove_secret("owner/mnemonic").await.unwrap();
        assert!(vault.get_secret("owner/mnemonic").await.unwrap().is_none());
        assert_eq!(vault.secret_count().await, 0);
    }

    #[tokio::test]
    async fn removing_absent_secret_is_not_found() {
        let vault = MemoryVault::new();
        assert!(matches!(
            vault.remove_secret("missing").await,
            Err(ConnectorError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn set_secret_overwrites() {
        let vault = MemoryVault::new();
        vault.set_secret("name", "first").await.unwrap();
        vault.set_secret("name", "second").await.unwrap();
        assert_eq!(vault.get_secret("name").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn signing_keys_expose_a_public_half() {
        let vault = MemoryVault::new();
        let key = vault.create_key("node/auth-signing", KeyType::Ed25519).await.unwrap();
        assert_eq!(key.key_type, KeyType::Ed25519);
        let public = key.public_key.unwrap();
        assert_eq!(bs58::decode(&public).into_vec().unwrap().len(), 32);

        let fetched = vault.get_key("node/auth-signing").await.unwrap().unwrap();
        assert_eq!(fetched.public_key.as_deref(), Some(public.as_str()));
    }

    #[tokio::test]
    async fn symmetric_keys_expose_nothing() {
        let vault = MemoryVault::new();
        let key = vault
            .create_key("node/blob-encryption", KeyType::ChaCha20Poly1305)
            .await
            .unwrap();
        assert!(key.public_key.is_none());
    }

    #[tokio::test]
    async fn duplicate_key_name_is_rejected() {
        let vault = MemoryVault::new();
        vault.create_key("node/key", KeyType::Ed25519).await.unwrap();
        assert!(matches!(
            vault.create_key("node/key", KeyType::Ed25519).await,
            Err(ConnectorError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn absent_key_is_none() {
        let vault = MemoryVault::new();
        assert!(vault.get_key("nothing").await.unwrap().is_none());
    }
}
