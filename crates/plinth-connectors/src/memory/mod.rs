//! In-memory reference implementations of the collaborator contracts.
//!
//! These back the `memory` connector profile: a self-contained suite for
//! development nodes and tests, with the same observable behavior the hosted
//! platform connectors have.

mod identity;
mod stores;
mod vault;
mod wallet;

pub use identity::MemoryIdentityRegistry;
pub use stores::{MemoryAddressStore, MemoryLoginStore, MemoryProfileStore};
pub use vault::MemoryVault;
pub use wallet::MemoryWallet;
