//! Funded identity provisioning.
//!
//! A node cannot anchor an identity document without a funded wallet
//! address, and the wallet cannot derive addresses without vault-held
//! recovery material filed under some owner. The step breaks that cycle by
//! staging the mnemonic under a throwaway bootstrap label, deriving and
//! funding addresses as that label, anchoring the document, and only then
//! promoting the mnemonic to the permanent identity.

use super::{ADDRESS_ACCOUNT, ADDRESS_COUNT, BootstrapService};
use crate::errors::{BootstrapError, Result};
use crate::types::{BootstrapStep, NodeState};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use plinth_connectors::{IdentityConnector, LoginConnector, VaultConnector, WalletConnector};
use rand::RngCore;
use tracing::{info, warn};

const STEP: BootstrapStep = BootstrapStep::NodeIdentity;

impl<V, W, I, L> BootstrapService<V, W, I, L>
where
    V: VaultConnector,
    W: WalletConnector,
    I: IdentityConnector,
    L: LoginConnector,
{
    pub(super) async fn provision_node_identity(&self, state: &mut NodeState) -> Result<()> {
        if state.node_identity.is_some() {
            return Err(BootstrapError::Integrity(
                "node identity present without a ledger entry".to_string(),
            ));
        }

        let label = temporary_label();
        self.secrets.stage_temporary(&label).await?;

        // Anything failing between staging and promotion must take the
        // staged copy with it, or a re-run would strand an orphaned secret.
        let (addresses, node_identity) = match self.fund_identity(&label).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.secrets.discard_temporary(&label).await;
                return Err(err);
            }
        };

        self.repoint_funding_address(&addresses[0], &node_identity)
            .await?;

        state.addresses = Some(addresses);
        state.node_identity = Some(node_identity);
        Ok(())
    }

    /// Derive addresses as the bootstrap label, fund the first one, anchor
    /// the identity document and promote the mnemonic to the permanent name.
    async fn fund_identity(&self, label: &str) -> Result<(Vec<String>, String)> {
        let addresses = self
            .wallet
            .get_addresses(label, ADDRESS_ACCOUNT, 0, ADDRESS_COUNT)
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        let funding_address = addresses
            .first()
            .ok_or_else(|| BootstrapError::Integrity("wallet returned no addresses".to_string()))?
            .clone();

        self.wallet
            .ensure_balance(label, &funding_address, self.config.min_funding)
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        info!(
            address = %funding_address,
            minimum = self.config.min_funding,
            "funding address holds the required balance"
        );

        let document = self
            .identity
            .create_document(&funding_address)
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        info!(identity = %document.id, "anchored node identity document");

        self.secrets.promote(label, &document.id).await?;

        Ok((addresses, document.id))
    }

    /// Re-point the funded address record from the bootstrap label to the
    /// permanent identity, when the wallet is registry-backed.
    async fn repoint_funding_address(&self, address: &str, node_identity: &str) -> Result<()> {
        let Some(address_store) = &self.address_store else {
            return Ok(());
        };

        let record = address_store
            .get(address)
            .await
            .map_err(|source| BootstrapError::collaborator(STEP, source))?;
        match record {
            Some(mut record) => {
                record.identity = node_identity.to_string();
                address_store
                    .set(record)
                    .await
                    .map_err(|source| BootstrapError::collaborator(STEP, source))?;
                info!(address = %address, identity = %node_identity, "re-pointed funding address");
                Ok(())
            }
            None => {
                warn!(address = %address, "funded address has no registry record");
                Err(BootstrapError::Integrity(format!(
                    "address record for {address} missing during ownership transfer"
                )))
            }
        }
    }
}

/// Build a throwaway bootstrap label.
///
/// URL-safe base64 keeps the label free of `/`, which separates owner and
/// secret name in composite vault names.
fn temporary_label() -> String {
    let mut raw = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut raw);
    format!("bootstrap-{}", URL_SAFE_NO_PAD.encode(raw))
}
