//! BIP-39 recovery phrase generation and seed expansion.

use crate::errors::{CryptoError, Result};
use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

/// Entropy size backing a generated recovery phrase (256 bits)
pub const MNEMONIC_ENTROPY_SIZE: usize = 32;

/// Word count of a generated recovery phrase
pub const MNEMONIC_WORD_COUNT: usize = 24;

/// Generate a new 24-word recovery phrase from CSPRNG entropy.
///
/// The phrase is the only way to recover the keys derived from it. Callers
/// decide how it is surfaced; it is never written anywhere by this crate.
pub fn generate_mnemonic() -> Result<Zeroizing<String>> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_SIZE];
    rand::thread_rng()
        .try_fill_bytes(&mut entropy)
        .map_err(|e| CryptoError::RandomGenerationFailed(e.to_string()))?;

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
    entropy.zeroize();

    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Expand a recovery phrase into its 64-byte BIP-39 seed.
///
/// Validates the word list and checksum before expansion. An empty
/// passphrase is used, matching how the node derives its wallet keys.
pub fn mnemonic_to_seed(phrase: &str) -> Result<Zeroizing<[u8; 64]>> {
    let mnemonic = parse_phrase(phrase)?;
    Ok(Zeroizing::new(mnemonic.to_seed("")))
}

/// Check whether a phrase is a valid English BIP-39 mnemonic.
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse_phrase(phrase).is_ok()
}

fn parse_phrase(phrase: &str) -> Result<Mnemonic> {
    let normalized = phrase
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");
    Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))
}
