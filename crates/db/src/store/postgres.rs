use async_trait::async_trait;

use crate::models::account::{Account, NewAccount};
use crate::repositories::AccountRepo;
use crate::DbPool;

use super::{AccountStore, StoreError};

/// [`AccountStore`] backed by the `accounts` table.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(AccountRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(AccountRepo::find_by_email(&self.pool, email).await?)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        Ok(AccountRepo::exists_by_username(&self.pool, username).await?)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(AccountRepo::exists_by_email(&self.pool, email).await?)
    }

    async fn save(&self, account: &NewAccount) -> Result<Account, StoreError> {
        let created = AccountRepo::create(&self.pool, account).await?;
        tracing::debug!(account_id = created.id, "Inserted account row");
        Ok(created)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
