//! Password generation and Argon2id hashing for login principals.

use crate::errors::{CryptoError, Result};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;
use zeroize::Zeroizing;

/// Characters used in generated passwords
const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&*+-=?@_";

/// Length of generated administrative passwords
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Generate a random password of the given length.
pub fn generate_password(length: usize) -> Zeroizing<String> {
    let mut rng = rand::thread_rng();
    let password: String = (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..PASSWORD_CHARSET.len());
            PASSWORD_CHARSET[idx] as char
        })
        .collect();
    Zeroizing::new(password)
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// Returns the PHC-formatted hash together with the salt string so both
/// fields of a login record can be persisted.
pub fn hash_password(password: &[u8]) -> Result<(String, String)> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password, &salt)
        .map_err(|e| CryptoError::PasswordHashFailed(e.to_string()))?;
    Ok((hash.to_string(), salt.as_str().to_string()))
}

/// Verify a password against a PHC-formatted hash.
pub fn verify_password(password: &[u8], hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash).map_err(|_| CryptoError::InvalidHashFormat)?;
    Argon2::default()
        .verify_password(password, &parsed)
        .map_err(|e| CryptoError::PasswordHashFailed(e.to_string()))
}
