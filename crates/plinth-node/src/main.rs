//! Plinth node entrypoint.
//!
//! Runs the bootstrap saga for this node and exits. Re-running is safe:
//! completed steps are skipped via the persisted node state.

mod config;
mod services;

use anyhow::Result;
use config::NodeConfig;
use services::NodeServices;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "plinth_node=info,plinth_bootstrap=info,plinth_connectors=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NodeConfig::from_env()?;
    tracing::info!(
        path = %config.state_path.display(),
        profile = %config.connector_profile,
        "starting plinth node bootstrap"
    );

    let services = NodeServices::new(&config)?;
    let state = services.bootstrap.run().await?;

    tracing::info!(
        identity = state.node_identity.as_deref().unwrap_or("<none>"),
        addresses = state.addresses.as_ref().map(|a| a.len()).unwrap_or(0),
        completed = state.bootstrapped_components.len(),
        "node bootstrap complete"
    );

    Ok(())
}
