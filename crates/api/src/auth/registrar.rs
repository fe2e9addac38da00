//! Account registration.
//!
//! [`Registrar::register`] turns a [`RegisterAccount`] request into a persisted
//! [`Account`]: validate, pre-check username then email uniqueness, hash the
//! password, save. The plaintext password never reaches the store or the logs.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use streamer_db::models::account::{Account, NewAccount};
use streamer_db::store::{AccountStore, StoreError, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};
use validator::Validate;

use crate::auth::password::hash_password;

/// A registration request.
///
/// Length limits match the `accounts` columns.
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterAccount {
    #[validate(length(min = 1, max = 100, message = "username must be 1-100 characters"))]
    pub username: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

impl fmt::Debug for RegisterAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[PROTECTED]")
            .finish()
    }
}

/// Why a registration was refused.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Invalid registration: {0}")]
    InvalidInput(String),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Account store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Creates accounts against an [`AccountStore`].
///
/// Stateless apart from the store handle; share one instance across handlers.
#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn AccountStore>,
}

impl Registrar {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// On success exactly one account has been saved. On any error nothing
    /// has been saved, and store failures are returned as-is without retry.
    pub async fn register(&self, mut input: RegisterAccount) -> Result<Account, RegistrationError> {
        validate(&input)?;
        input.email = normalize_email(&input.email);

        // 1. Username must be free.
        if self
            .store
            .exists_by_username(&input.username)
            .await
            .map_err(RegistrationError::StoreUnavailable)?
        {
            tracing::info!(username = %input.username, "Registration rejected: username taken");
            return Err(RegistrationError::DuplicateUsername(input.username));
        }

        // 2. Email must be free too.
        if self
            .store
            .exists_by_email(&input.email)
            .await
            .map_err(RegistrationError::StoreUnavailable)?
        {
            tracing::info!(username = %input.username, "Registration rejected: email taken");
            return Err(RegistrationError::DuplicateEmail(input.email));
        }

        // 3. Hash.
        let password_hash = hash_password(&input.password)
            .map_err(|e| RegistrationError::Hashing(e.to_string()))?;

        // 4. Persist. A concurrent registration can still win the race between
        //    the pre-checks and the insert; the store's constraints catch that.
        let new_account = NewAccount {
            username: input.username,
            email: input.email,
            password_hash,
        };
        let account = self
            .store
            .save(&new_account)
            .await
            .map_err(|err| match err.violated_constraint() {
                Some(USERNAME_CONSTRAINT) => {
                    RegistrationError::DuplicateUsername(new_account.username.clone())
                }
                Some(EMAIL_CONSTRAINT) => {
                    RegistrationError::DuplicateEmail(new_account.email.clone())
                }
                _ => RegistrationError::StoreUnavailable(err),
            })?;

        tracing::info!(account_id = account.id, username = %account.username, "Account registered");
        Ok(account)
    }
}

/// Emails are stored and compared lowercased, so `A@x.com` and `a@x.com`
/// are the same address. Usernames keep their case.
fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

fn validate(input: &RegisterAccount) -> Result<(), RegistrationError> {
    if input.username.chars().any(char::is_control) {
        return Err(RegistrationError::InvalidInput(
            "username must not contain control characters".into(),
        ));
    }
    if input.email.chars().any(char::is_control) {
        return Err(RegistrationError::InvalidInput(
            "email must not contain control characters".into(),
        ));
    }
    if input.username.trim().is_empty() {
        return Err(RegistrationError::InvalidInput(
            "username must not be blank".into(),
        ));
    }
    if input.email.trim().is_empty() {
        return Err(RegistrationError::InvalidInput(
            "email must not be blank".into(),
        ));
    }
    input
        .validate()
        .map_err(|errors| RegistrationError::InvalidInput(errors.to_string()))
}
