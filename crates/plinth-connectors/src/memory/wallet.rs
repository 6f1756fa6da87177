//! Registry-backed in-memory custody wallet.

use crate::errors::{ConnectorError, Result};
use crate::memory::MemoryAddressStore;
use crate::traits::{AddressStore, VaultConnector, WalletConnector};
use crate::types::WalletAddress;
use async_trait::async_trait;
use plinth_crypto::{derive_address, mnemonic_to_seed};
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// In-memory [`WalletConnector`] implementation.
///
/// Addresses are derived deterministically from the owner's recovery phrase
/// held in the vault under `<owner>/mnemonic`, and recorded in a shared
/// address registry. `ensure_balance` credits the recorded balance up to the
/// requested minimum, standing in for the platform faucet.
pub struct MemoryWallet<V> {
    vault: Arc<V>,
    addresses: Arc<MemoryAddressStore>,
}

impl<V: VaultConnector> MemoryWallet<V> {
    /// Create a wallet over a vault and a shared address registry
    pub fn new(vault: Arc<V>, addresses: Arc<MemoryAddressStore>) -> Self {
        Self { vault, addresses }
    }

    async fn owner_seed(&self, owner: &str) -> Result<Zeroizing<[u8; 64]>> {
        let name = format!("{owner}/mnemonic");
        let phrase = self
            .vault
            .get_secret(&name)
            .await?
            .map(Zeroizing::new)
            .ok_or_else(|| ConnectorError::NotFound(format!("secret {name}")))?;
        Ok(mnemonic_to_seed(&phrase)?)
    }
}

#[async_trait]
impl<V: VaultConnector> WalletConnector for MemoryWallet<V> {
    async fn get_addresses(
        &self,
        owner: &str,
        account: u32,
        start_index: u32,
        count: u32,
    ) -> Result<Vec<String>> {
        let seed = self.owner_seed(owner).await?;
        let mut derived = Vec::with_capacity(count as usize);
        for index in start_index..start_index.saturating_add(count) {
            let address = derive_address(&seed[..], account, index)?;
            // Re-deriving a known address must not reset its record.
            if self.addresses.get(&address).await?.is_none() {
                self.addresses
                    .set(WalletAddress {
                        address: address.clone(),
                        identity: owner.to_string(),
                        account,
                        index,
                        balance: 0,
                    })
                    .await?;
            }
            derived.push(address);
        }
        debug!(owner = %owner, count = derived.len(), "derived wallet addresses");
        Ok(derived)
    }

    async fn ensure_balance(&self, owner: &str, address: &str, minimum: u64) -> Result<()> {
        let mut record = self
            .addresses
            .get(address)
            .await?
            .ok_or_else(|| ConnectorError::NotFound(format!("address {address}")))?;
        if record.balance < minimum {
            debug!(owner = %owner, address = %address, minimum, "crediting address");
            record.balance = minimum;
            self.addresses.set(record).await?;
        }
        Ok(())
    }
}
