//! # plinth-bootstrap
//!
//! The node bootstrap orchestrator: a one-time but safely re-runnable
//! provisioning saga that gives a freshly deployed node a permanent
//! decentralized identity, funds its custody wallet, migrates the recovery
//! mnemonic from a throwaway bootstrap label to the permanent identity, and
//! registers the keys and verification methods later capabilities depend on.
//!
//! Progress is recorded in a persisted ledger of completed step names.
//! Interrupted runs resume at the first incomplete step; completed steps
//! never repeat their external side effects.

#![warn(clippy::all)]

pub mod errors;
pub mod secrets;
mod service;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

pub use errors::{BootstrapError, Result};
pub use secrets::{MNEMONIC_SECRET_NAME, SecretLifecycle};
pub use service::BootstrapService;
pub use state::NodeStateStore;
pub use types::{AuthMode, BootstrapConfig, BootstrapStep, NodeState};
