//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the verified subject from a Bearer token.

pub mod auth;
