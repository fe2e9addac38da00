use std::sync::Arc;

use streamer_db::store::AccountStore;

use crate::auth::registrar::Registrar;
use crate::auth::token::TokenAuthority;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Account persistence.
    pub accounts: Arc<dyn AccountStore>,
    /// Account registration over `accounts`.
    pub registrar: Arc<Registrar>,
    /// Token issuance and verification.
    pub tokens: Arc<TokenAuthority>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the registrar and token authority over `accounts` using `config`.
    pub fn new(accounts: Arc<dyn AccountStore>, config: ServerConfig) -> Self {
        let tokens = TokenAuthority::new(&config.token);
        Self::with_tokens(accounts, config, tokens)
    }

    /// Like [`AppState::new`] but with a prebuilt token authority (e.g. one
    /// reading a manual clock).
    pub fn with_tokens(
        accounts: Arc<dyn AccountStore>,
        config: ServerConfig,
        tokens: TokenAuthority,
    ) -> Self {
        Self {
            registrar: Arc::new(Registrar::new(Arc::clone(&accounts))),
            accounts,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}
