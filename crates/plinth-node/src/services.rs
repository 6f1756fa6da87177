//! Collaborator wiring for the selected connector profile.

use crate::config::NodeConfig;
use anyhow::Result;
use plinth_bootstrap::{BootstrapService, NodeStateStore};
use plinth_connectors::{
    MemoryAddressStore, MemoryIdentityRegistry, MemoryLoginStore, MemoryProfileStore, MemoryVault,
    MemoryWallet,
};
use std::sync::Arc;

/// Services assembled for this node process
pub struct NodeServices {
    /// Bootstrap orchestrator over the wired collaborator suite
    pub bootstrap:
        BootstrapService<MemoryVault, MemoryWallet<MemoryVault>, MemoryIdentityRegistry, MemoryLoginStore>,
}

impl NodeServices {
    /// Wire the collaborator suite for the configured profile.
    pub fn new(config: &NodeConfig) -> Result<Self> {
        match config.connector_profile.as_str() {
            "memory" => {}
            other => anyhow::bail!("unknown connector profile '{other}' (supported: memory)"),
        }

        let vault = Arc::new(MemoryVault::new());
        let addresses = Arc::new(MemoryAddressStore::new());
        let wallet = Arc::new(MemoryWallet::new(Arc::clone(&vault), Arc::clone(&addresses)));
        let registry = Arc::new(MemoryIdentityRegistry::new());
        let logins = Arc::new(MemoryLoginStore::new());
        let profiles = Arc::new(MemoryProfileStore::new());

        let bootstrap = BootstrapService::new(
            vault,
            wallet,
            registry,
            logins,
            NodeStateStore::new(config.state_path.clone()),
            config.bootstrap.clone(),
        )?
        .with_profiles(profiles)
        .with_address_store(addresses);

        Ok(NodeServices { bootstrap })
    }
}
