//! # plinth-crypto
//!
//! Cryptographic primitives for the plinth node bootstrap: recovery phrase
//! generation, deterministic wallet key derivation and login password
//! hashing.
//!
//! ## Security Properties
//!
//! - Generated secret material is wrapped in [`zeroize::Zeroizing`]
//! - All derivations are domain separated and versioned
//! - No unsafe code

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod derivation;
pub mod errors;
pub mod mnemonic;
pub mod password;

pub use derivation::{derive_address, derive_address_seed};
pub use errors::{CryptoError, Result};
pub use mnemonic::{generate_mnemonic, mnemonic_to_seed, validate_mnemonic};
pub use password::{generate_password, hash_password, verify_password, DEFAULT_PASSWORD_LENGTH};
