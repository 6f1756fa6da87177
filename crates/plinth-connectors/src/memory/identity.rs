//! In-memory decentralized identity registry.

use crate::errors::{ConnectorError, Result};
use crate::traits::IdentityConnector;
use crate::types::{IdentityDocument, VerificationMethod, VerificationPurpose};
use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use rand::RngCore;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory [`IdentityConnector`] implementation.
///
/// Identifiers use the `did:plinth` method with a random bs58 suffix.
pub struct MemoryIdentityRegistry {
    documents: RwLock<HashMap<String, IdentityDocument>>,
}

impl MemoryIdentityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a stored document
    pub async fn document(&self, identity: &str) -> Option<IdentityDocument> {
        self.documents.read().await.get(identity).cloned()
    }

    /// Number of stored documents
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl Default for MemoryIdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    rand::thread_rng()
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ConnectorError::Other(format!("random generation failed: {e}")))?;
    Ok(bytes)
}

#[async_trait]
impl IdentityConnector for MemoryIdentityRegistry {
    async fn create_document(&self, controller: &str) -> Result<IdentityDocument> {
        if controller.is_empty() {
            return Err(ConnectorError::InvalidInput(
                "controller address is empty".to_string(),
            ));
        }
        let suffix: [u8; 16] = random_bytes()?;
        let document = IdentityDocument {
            id: format!("did:plinth:{}", bs58::encode(suffix).into_string()),
            controller: controller.to_string(),
            verification_methods: Vec::new(),
        };
        self.documents
            .write()
            .await
            .insert(document.id.clone(), document.clone());
        debug!(identity = %document.id, controller = %controller, "created identity document");
        Ok(document)
    }

    async fn add_verification_method(
        &self,
        identity: &str,
        controller: &str,
        purpose: VerificationPurpose,
        method_id: &str,
    ) -> Result<VerificationMethod> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(identity)
            .ok_or_else(|| ConnectorError::NotFound(format!("identity {identity}")))?;

        let full_id = format!("{identity}#{method_id}");
        if document.verification_methods.iter().any(|m| m.id == full_id) {
            return Err(ConnectorError::AlreadyExists(format!(
                "verification method {full_id}"
            )));
        }

        let seed: [u8; 32] = random_bytes()?;
        let key = SigningKey::from_bytes(&seed);
        let method = VerificationMethod {
            id: full_id,
            controller: controller.to_string(),
            purpose,
            public_key: bs58::encode(key.verifying_key().to_bytes()).into_string(),
        };
        document.verification_methods.push(method.clone());
        debug!(method = %method.id, "registered verification method");
        Ok(method)
    }
}
