use async_trait::async_trait;
use chrono::Utc;
use streamer_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::account::{Account, NewAccount};

use super::{AccountStore, StoreError, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};

/// An in-memory account store.
///
/// Assigns sequential ids starting at 1 and rejects duplicate usernames or
/// emails exactly like the Postgres constraints do. Thread-safe via interior
/// `RwLock`; wrap in `Arc` to share.
#[derive(Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<Account>,
    next_id: DbId,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.inner.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.iter().any(|a| a.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.iter().any(|a| a.email == email))
    }

    async fn save(&self, account: &NewAccount) -> Result<Account, StoreError> {
        // Check and insert under one write lock so concurrent saves cannot
        // both pass the uniqueness check.
        let mut inner = self.inner.write().await;

        if inner.accounts.iter().any(|a| a.username == account.username) {
            return Err(StoreError::UniqueViolation {
                constraint: USERNAME_CONSTRAINT.to_string(),
            });
        }
        if inner.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::UniqueViolation {
                constraint: EMAIL_CONSTRAINT.to_string(),
            });
        }

        inner.next_id += 1;
        let now = Utc::now();
        let created = Account {
            id: inner.next_id,
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.accounts.push(created.clone());
        Ok(created)
    }
}
