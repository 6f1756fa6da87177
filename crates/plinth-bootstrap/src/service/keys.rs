//! Signing and encryption key provisioning.

use super::BootstrapService;
use crate::errors::{BootstrapError, Result};
use crate::types::{BootstrapStep, NodeState};
use plinth_connectors::{
    IdentityConnector, KeyType, LoginConnector, VaultConnector, WalletConnector,
};
use tracing::{info, warn};

impl<V, W, I, L> BootstrapService<V, W, I, L>
where
    V: VaultConnector,
    W: WalletConnector,
    I: IdentityConnector,
    L: LoginConnector,
{
    /// Ensure the node's authentication signing key exists.
    ///
    /// A key already present in the vault (ledger lost, vault intact) is
    /// adopted instead of recreated.
    pub(super) async fn ensure_signing_key(&self, state: &NodeState) -> Result<()> {
        const STEP: BootstrapStep = BootstrapStep::AuthSigningKey;
        let node_identity = self.require_node_identity(state)?;
        let name = format!("{node_identity}/{}", self.config.auth_signing_key_name);

        let existing = self
            .vault
            .get_key(&name)
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        if existing.is_some() {
            warn!(key = %name, "signing key already present in vault, adopting it");
            return Ok(());
        }

        self.vault
            .create_key(&name, KeyType::Ed25519)
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        info!(key = %name, "created authentication signing key");
        Ok(())
    }

    /// Create a named symmetric key for data-at-rest encryption.
    ///
    /// No existence probe here: the ledger alone decides whether the step
    /// runs, and a name collision from a lost ledger surfaces as the
    /// collaborator error instead of being masked.
    pub(super) async fn ensure_encryption_key(
        &self,
        state: &NodeState,
        step: BootstrapStep,
        key_name: &str,
    ) -> Result<()> {
        let node_identity = self.require_node_identity(state)?;
        let name = format!("{node_identity}/{key_name}");

        self.vault
            .create_key(&name, KeyType::ChaCha20Poly1305)
            .await
            .map_err(|source| BootstrapError::collaborator(step, source))?;
        info!(key = %name, "created encryption key");
        Ok(())
    }
}
