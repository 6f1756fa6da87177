//! Deterministic wallet key derivation.
//!
//! Address keys are expanded from the owner's BIP-39 seed with HKDF-SHA256.
//! Every derivation is domain separated by a versioned info string, so keys
//! for different accounts and indexes never collide.

use crate::errors::{CryptoError, Result};
use ed25519_dalek::SigningKey;
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Domain separation prefix for wallet address keys
const DOMAIN_WALLET_ADDRESS: &str = "plinth:wallet:address:v1";

/// Derive the Ed25519 signing seed for one wallet address.
///
/// Formula: `HKDF-SHA256(seed, info = "plinth:wallet:address:v1" || account || index)`
/// with both integers big-endian encoded.
pub fn derive_address_seed(seed: &[u8], account: u32, index: u32) -> Result<Zeroizing<[u8; 32]>> {
    let mut info = Vec::with_capacity(DOMAIN_WALLET_ADDRESS.len() + 8);
    info.extend_from_slice(DOMAIN_WALLET_ADDRESS.as_bytes());
    info.extend_from_slice(&account.to_be_bytes());
    info.extend_from_slice(&index.to_be_bytes());

    let hkdf = Hkdf::<Sha256>::new(None, seed);
    let mut okm = [0u8; 32];
    hkdf.expand(&info, &mut okm)
        .map_err(|_| CryptoError::DerivationFailed)?;
    Ok(Zeroizing::new(okm))
}

/// Derive the address string for one wallet index.
///
/// The address is the bs58 encoding of the Ed25519 verifying key, so it can
/// be recomputed from the recovery phrase alone.
pub fn derive_address(seed: &[u8], account: u32, index: u32) -> Result<String> {
    let signing_seed = derive_address_seed(seed, account, index)?;
    let signing_key = SigningKey::from_bytes(&signing_seed);
    Ok(bs58::encode(signing_key.verifying_key().to_bytes()).into_string())
}
