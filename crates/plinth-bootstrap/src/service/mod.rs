//! Node bootstrap orchestrator.

mod admin;
mod identity;
mod keys;
mod methods;

use crate::errors::{BootstrapError, Result};
use crate::secrets::SecretLifecycle;
use crate::state::NodeStateStore;
use crate::types::{AuthMode, BootstrapConfig, BootstrapStep, NodeState};
use plinth_connectors::{
    AddressStore, IdentityConnector, LoginConnector, ProfileConnector, VaultConnector,
    WalletConnector,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Number of wallet addresses derived for a node
pub(crate) const ADDRESS_COUNT: u32 = 5;

/// Wallet account the node's addresses are derived under
pub(crate) const ADDRESS_ACCOUNT: u32 = 0;

/// Runs the provisioning saga for one node.
///
/// Collaborators are injected once at construction. The ledger inside the
/// persisted [`NodeState`] decides which steps still need to run, so the
/// same service can be run repeatedly: completed steps are skipped without
/// touching any collaborator, and an interrupted run resumes at the first
/// incomplete step.
pub struct BootstrapService<V, W, I, L>
where
    V: VaultConnector,
    W: WalletConnector,
    I: IdentityConnector,
    L: LoginConnector,
{
    pub(super) vault: Arc<V>,
    pub(super) wallet: Arc<W>,
    pub(super) identity: Arc<I>,
    pub(super) logins: Arc<L>,
    pub(super) profiles: Option<Arc<dyn ProfileConnector>>,
    pub(super) address_store: Option<Arc<dyn AddressStore>>,
    pub(super) secrets: SecretLifecycle<V>,
    pub(super) store: NodeStateStore,
    pub(super) config: BootstrapConfig,
}

impl<V, W, I, L> BootstrapService<V, W, I, L>
where
    V: VaultConnector,
    W: WalletConnector,
    I: IdentityConnector,
    L: LoginConnector,
{
    /// Create an orchestrator over the given collaborators.
    ///
    /// Fails with a configuration error when the config is unusable; no
    /// step runs in that case.
    pub fn new(
        vault: Arc<V>,
        wallet: Arc<W>,
        identity: Arc<I>,
        logins: Arc<L>,
        store: NodeStateStore,
        config: BootstrapConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            secrets: SecretLifecycle::new(Arc::clone(&vault)),
            vault,
            wallet,
            identity,
            logins,
            profiles: None,
            address_store: None,
            store,
            config,
        })
    }

    /// Attach the optional identity profile collaborator.
    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileConnector>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Attach the address-ownership registry of a registry-backed wallet,
    /// so the funded address can be re-pointed at the permanent identity.
    pub fn with_address_store(mut self, addresses: Arc<dyn AddressStore>) -> Self {
        self.address_store = Some(addresses);
        self
    }

    /// Run the provisioning saga.
    ///
    /// Steps already in the ledger are skipped. Steps whose configuration
    /// gate is closed are skipped without being recorded, so they run on a
    /// later invocation once enabled. The state file is rewritten after
    /// every completed step; on the first failure the run aborts with the
    /// failing step recorded nowhere, leaving earlier progress intact.
    pub async fn run(&self) -> Result<NodeState> {
        let mut state = self.store.load()?;
        info!(
            path = %self.store.path().display(),
            completed = state.bootstrapped_components.len(),
            "starting node bootstrap"
        );

        for step in BootstrapStep::ORDERED {
            if state.is_bootstrapped(step) {
                debug!(step = %step, "step already recorded, skipping");
                continue;
            }
            if !self.step_enabled(step) {
                debug!(step = %step, "step disabled by configuration, skipping");
                continue;
            }

            info!(step = %step, "running bootstrap step");
            match step {
                BootstrapStep::NodeIdentity => self.provision_node_identity(&mut state).await?,
                BootstrapStep::AdminPrincipal => self.provision_admin(&state).await?,
                BootstrapStep::AuthSigningKey => self.ensure_signing_key(&state).await?,
                BootstrapStep::BlobEncryptionKey => {
                    self.ensure_encryption_key(&state, step, &self.config.blob_encryption_key_name)
                        .await?
                }
                BootstrapStep::IntegrityEncryptionKey => {
                    self.ensure_encryption_key(
                        &state,
                        step,
                        &self.config.integrity_encryption_key_name,
                    )
                    .await?
                }
                BootstrapStep::AttestationVerificationMethod => {
                    self.register_verification_method(
                        &state,
                        step,
                        &self.config.attestation_method_id,
                    )
                    .await?
                }
                BootstrapStep::IntegrityVerificationMethod => {
                    self.register_verification_method(&state, step, &self.config.integrity_method_id)
                        .await?
                }
            }

            state.record(step);
            self.store.save(&state)?;
            info!(step = %step, "bootstrap step complete");
        }

        info!(
            identity = state.node_identity.as_deref().unwrap_or("<none>"),
            completed = state.bootstrapped_components.len(),
            "node bootstrap finished"
        );
        Ok(state)
    }

    fn step_enabled(&self, step: BootstrapStep) -> bool {
        match step {
            BootstrapStep::AdminPrincipal => self.config.auth_mode == AuthMode::Native,
            BootstrapStep::BlobEncryptionKey => self.config.enable_blob_encryption,
            BootstrapStep::IntegrityEncryptionKey => self.config.enable_integrity_encryption,
            _ => true,
        }
    }

    /// Identity every step after `NodeIdentity` operates on.
    pub(super) fn require_node_identity<'a>(&self, state: &'a NodeState) -> Result<&'a str> {
        state.node_identity.as_deref().ok_or_else(|| {
            BootstrapError::Integrity(
                "node identity must be provisioned before dependent steps".to_string(),
            )
        })
    }
}
