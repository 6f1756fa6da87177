//! Node configuration from environment variables.

use anyhow::Result;
use plinth_bootstrap::{AuthMode, BootstrapConfig};
use std::path::PathBuf;

/// Node configuration
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Path of the persisted node state document
    pub state_path: PathBuf,
    /// Connector profile backing the collaborator suite
    pub connector_profile: String,
    /// Orchestrator settings
    pub bootstrap: BootstrapConfig,
}

impl NodeConfig {
    /// Load configuration from `PLINTH_*` environment variables, with
    /// defaults suitable for a local development node.
    pub fn from_env() -> Result<Self> {
        let state_path: PathBuf = std::env::var("PLINTH_STATE_PATH")
            .unwrap_or_else(|_| "./data/node-state.json".to_string())
            .into();

        let connector_profile =
            std::env::var("PLINTH_CONNECTOR_PROFILE").unwrap_or_else(|_| "memory".to_string());

        let mut bootstrap = BootstrapConfig::default();

        if let Ok(username) = std::env::var("PLINTH_ADMIN_USERNAME") {
            bootstrap.admin_username = username;
        }

        bootstrap.auth_mode = match std::env::var("PLINTH_AUTH_MODE")
            .unwrap_or_else(|_| "native".to_string())
            .as_str()
        {
            "native" => AuthMode::Native,
            "external" => AuthMode::External,
            other => anyhow::bail!("unsupported PLINTH_AUTH_MODE '{other}' (native|external)"),
        };

        bootstrap.min_funding = std::env::var("PLINTH_MIN_FUNDING")
            .unwrap_or_else(|_| "1000000000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PLINTH_MIN_FUNDING: {e}"))?;

        bootstrap.enable_blob_encryption = env_flag("PLINTH_BLOB_ENCRYPTION")?;
        bootstrap.enable_integrity_encryption = env_flag("PLINTH_INTEGRITY_ENCRYPTION")?;

        if let Ok(name) = std::env::var("PLINTH_AUTH_KEY_NAME") {
            bootstrap.auth_signing_key_name = name;
        }
        if let Ok(name) = std::env::var("PLINTH_BLOB_KEY_NAME") {
            bootstrap.blob_encryption_key_name = name;
        }
        if let Ok(name) = std::env::var("PLINTH_INTEGRITY_KEY_NAME") {
            bootstrap.integrity_encryption_key_name = name;
        }

        Ok(NodeConfig {
            state_path,
            connector_profile,
            bootstrap,
        })
    }
}

fn env_flag(var: &str) -> Result<bool> {
    match std::env::var(var)
        .unwrap_or_else(|_| "false".to_string())
        .as_str()
    {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => anyhow::bail!("{var} must be true or false, got '{other}'"),
    }
}
