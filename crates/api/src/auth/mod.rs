//! Credential and token primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- the token authority: signed token issuance and verification.
//! - [`registrar`] -- account registration with uniqueness checks.

pub mod password;
pub mod registrar;
pub mod token;
