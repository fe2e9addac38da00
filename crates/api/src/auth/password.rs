//! Password hashing for stored credentials.
//!
//! Hashes are Argon2id (v0x13, default cost parameters) over a fresh random
//! salt per call, stored as PHC strings so the parameters travel with the
//! hash. Verification goes through the Argon2 verifier only.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Why a password could not be hashed or checked.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The stored value is not a PHC string.
    #[error("stored password hash is not a valid PHC string: {0}")]
    MalformedHash(argon2::password_hash::Error),

    /// The hasher itself failed.
    #[error("password hashing failed: {0}")]
    Hasher(argon2::password_hash::Error),
}

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hash `password`, returning a PHC string such as `$argon2id$v=19$...`.
///
/// Two calls with the same password return different strings.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hasher)
}

/// Check `password` against a stored PHC hash.
///
/// `Ok(false)` on mismatch; `Err` only when `hash` cannot be parsed or the
/// verifier fails.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(PasswordError::MalformedHash)?;
    match hasher().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hasher(e)),
    }
}
