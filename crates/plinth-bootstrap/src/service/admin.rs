//! Administrative principal provisioning.

use super::BootstrapService;
use crate::errors::{BootstrapError, Result};
use crate::types::{BootstrapStep, NodeState};
use plinth_connectors::{
    AdminPrincipal, IdentityConnector, LoginConnector, VaultConnector, WalletConnector,
};
use plinth_crypto::{DEFAULT_PASSWORD_LENGTH, generate_password, hash_password};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

const STEP: BootstrapStep = BootstrapStep::AdminPrincipal;

impl<V, W, I, L> BootstrapService<V, W, I, L>
where
    V: VaultConnector,
    W: WalletConnector,
    I: IdentityConnector,
    L: LoginConnector,
{
    /// Create the node's administrative login and, when a profile
    /// collaborator is wired, its identity profile.
    ///
    /// A principal already present under the configured username (ledger
    /// lost, login store intact) is adopted instead of overwritten.
    pub(super) async fn provision_admin(&self, state: &NodeState) -> Result<()> {
        let node_identity = self.require_node_identity(state)?;
        let username = self.config.admin_username.as_str();

        let existing = self
            .logins
            .get(username)
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        if existing.is_some() {
            warn!(username = %username, "login principal already present, adopting it");
            return Ok(());
        }

        let password = generate_password(DEFAULT_PASSWORD_LENGTH);
        info!(
            username = %username,
            "admin password (shown once, store it securely): {}",
            password.as_str()
        );
        let (password_hash, salt) = hash_password(password.as_bytes())?;

        self.logins
            .set(AdminPrincipal {
                id: Uuid::new_v4(),
                username: username.to_string(),
                password_hash,
                salt,
                identity: node_identity.to_string(),
            })
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        info!(username = %username, "created admin login principal");

        if let Some(profiles) = &self.profiles {
            profiles
                .create(
                    node_identity,
                    json!({ "type": "Person", "name": "Node Administrator" }),
                    json!({
                        "givenName": "Node",
                        "familyName": "Administrator",
                        "email": username,
                    }),
                )
                .await
                .map_err(|source| BootstrapError::collaborator(STEP, source))?;
            info!(identity = %node_identity, "created admin identity profile");
        }

        Ok(())
    }
}
