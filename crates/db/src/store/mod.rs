//! The account store seam.
//!
//! The registrar and the HTTP layer only see [`AccountStore`]. Production wires
//! in [`PgAccountStore`]; tests and local runs can use [`InMemoryAccountStore`],
//! which enforces the same uniqueness constraints.

mod memory;
mod postgres;

pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

use async_trait::async_trait;

use crate::models::account::{Account, NewAccount};

/// Name of the unique constraint on `accounts.username`.
pub const USERNAME_CONSTRAINT: &str = "uq_accounts_username";

/// Name of the unique constraint on `accounts.email`.
pub const EMAIL_CONSTRAINT: &str = "uq_accounts_email";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by an [`AccountStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert collided with a unique constraint.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    /// The database rejected or failed the query.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The store could not be reached at all.
    #[error("Account store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// The violated constraint name, if this is a uniqueness failure.
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation { constraint } => Some(constraint),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation { constraint };
            }
        }
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// Lookup and persistence of accounts by username or email.
///
/// Implementations must enforce uniqueness of both username and email and
/// report collisions as [`StoreError::UniqueViolation`] carrying
/// [`USERNAME_CONSTRAINT`] or [`EMAIL_CONSTRAINT`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new account. The store assigns the identifier.
    async fn save(&self, account: &NewAccount) -> Result<Account, StoreError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
