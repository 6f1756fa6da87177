//! Verification method registration.

use super::BootstrapService;
use crate::errors::{BootstrapError, Result};
use crate::types::{BootstrapStep, NodeState};
use plinth_connectors::{
    IdentityConnector, LoginConnector, VaultConnector, VerificationPurpose, WalletConnector,
};
use tracing::info;

impl<V, W, I, L> BootstrapService<V, W, I, L>
where
    V: VaultConnector,
    W: WalletConnector,
    I: IdentityConnector,
    L: LoginConnector,
{
    /// Register an assertion verification method on the node's document.
    /// The node identity is both subject and controller.
    pub(super) async fn register_verification_method(
        &self,
        state: &NodeState,
        step: BootstrapStep,
        method_id: &str,
    ) -> Result<()> {
        let node_identity = self.require_node_identity(state)?;
        let method = self
            .identity
            .add_verification_method(
                node_identity,
                node_identity,
                VerificationPurpose::AssertionMethod,
                method_id,
            )
            .await
            .map_err(|source| BootstrapError::collaborator(step, source))?;
        info!(method = %method.id, "registered verification method");
        Ok(())
    }
}
