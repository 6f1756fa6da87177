//! # plinth-connectors
//!
//! Collaborator contracts the plinth node bootstrap is built against, plus
//! the in-memory reference implementations backing the `memory` connector
//! profile.
//!
//! The orchestrator only ever sees the traits in [`traits`]; swapping a
//! hosted platform connector for an in-memory one is a wiring decision.

#![warn(clippy::all)]

pub mod errors;
pub mod memory;
pub mod traits;
pub mod types;

pub use errors::{ConnectorError, Result};
pub use memory::{
    MemoryAddressStore, MemoryIdentityRegistry, MemoryLoginStore, MemoryProfileStore, MemoryVault,
    MemoryWallet,
};
pub use traits::{
    AddressStore, IdentityConnector, LoginConnector, ProfileConnector, VaultConnector,
    WalletConnector,
};
pub use types::{
    AdminPrincipal, IdentityDocument, KeyType, VaultKey, VerificationMethod, VerificationPurpose,
    WalletAddress,
};
