//! Shared building blocks for the Streamer identity service.
//!
//! - [`types`] -- primary key and timestamp aliases used by every crate.
//! - [`error`] -- domain error type shared by the store and the API.
//! - [`clock`] -- injectable time source for anything that checks expiry.

pub mod clock;
pub mod error;
pub mod types;
