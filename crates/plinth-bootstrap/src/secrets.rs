//! Mnemonic custody across the temporary-to-permanent identity transition.

use crate::errors::{BootstrapError, Result};
use crate::types::BootstrapStep;
use plinth_connectors::VaultConnector;
use plinth_crypto::generate_mnemonic;
use std::sync::Arc;
use tracing::{info, warn};
use zeroize::Zeroizing;

/// Secret name an owner's recovery mnemonic is stored under
pub const MNEMONIC_SECRET_NAME: &str = "mnemonic";

/// Manages the one secret that must survive the identity transition.
///
/// The recovery mnemonic is staged under a throwaway bootstrap label, then
/// promoted to the permanent identity once that identity exists. Promotion
/// writes the permanent copy before deleting the staged one, so a
/// retrievable copy exists at every point in between.
pub struct SecretLifecycle<V> {
    vault: Arc<V>,
}

impl<V: VaultConnector> SecretLifecycle<V> {
    /// Create a lifecycle manager over a vault
    pub fn new(vault: Arc<V>) -> Self {
        Self { vault }
    }

    /// Generate the recovery mnemonic and stage it under a temporary label.
    ///
    /// The phrase is written to the progress log exactly once. It is not
    /// recoverable from anywhere else, so the operator must capture it.
    pub async fn stage_temporary(&self, label: &str) -> Result<()> {
        let phrase = generate_mnemonic()?;
        info!(
            "node recovery phrase (shown once, store it securely): {}",
            phrase.as_str()
        );
        self.vault
            .set_secret(&secret_name(label), &phrase)
            .await
            .map_err(|source| BootstrapError::collaborator(BootstrapStep::NodeIdentity, source))
    }

    /// Move the mnemonic from the temporary label to the permanent identity.
    ///
    /// A failure to remove the staged copy is logged and absorbed: the label
    /// is discarded after this call, which leaves the stray copy unreachable
    /// rather than the mnemonic lost.
    pub async fn promote(&self, label: &str, identity: &str) -> Result<()> {
        let temp_name = secret_name(label);
        let phrase = self
            .vault
            .get_secret(&temp_name)
            .await
            .map_err(|source| BootstrapError::collaborator(BootstrapStep::NodeIdentity, source))?
            .map(Zeroizing::new)
            .ok_or_else(|| {
                BootstrapError::Integrity(format!(
                    "staged mnemonic {temp_name} missing before promotion"
                ))
            })?;

        self.vault
            .set_secret(&secret_name(identity), &phrase)
            .await
            .map_err(|source| BootstrapError::collaborator(BootstrapStep::NodeIdentity, source))?;

        if let Err(err) = self.vault.remove_secret(&temp_name).await {
            warn!(label = %label, error = %err, "failed to remove staged mnemonic copy");
        }
        Ok(())
    }

    /// Best-effort removal of the staged mnemonic after a failed run.
    pub async fn discard_temporary(&self, label: &str) {
        match self.vault.remove_secret(&secret_name(label)).await {
            Ok(()) => info!(label = %label, "removed staged mnemonic after failed bootstrap"),
            Err(err) => warn!(label = %label, error = %err, "failed to remove staged mnemonic"),
        }
    }
}

/// Composite secret name for an owner's mnemonic
pub(crate) fn secret_name(owner: &str) -> String {
    format!("{owner}/{MNEMONIC_SECRET_NAME}")
}
