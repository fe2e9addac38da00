//! Handlers for the `/auth` resource (signup, current session).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use streamer_core::types::Timestamp;
use streamer_db::models::account::AccountResponse;

use crate::auth::registrar::RegisterAccount;
use crate::auth::token::CustomClaims;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Successful signup response. Never carries the password or its hash.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub username: String,
    pub message: String,
    /// Access token for the new account.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account: AccountResponse,
    pub issued_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    /// Custom claims carried by the presented token.
    pub claims: CustomClaims,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Liveness text for the auth service.
pub const AUTH_HEALTH_MESSAGE: &str = "Auth Server Up and Running";

/// GET /api/auth/health
///
/// Plain-text liveness check. Does not touch the account store; use
/// `GET /health` for dependency status.
pub async fn health() -> &'static str {
    AUTH_HEALTH_MESSAGE
}

/// POST /api/auth/signup
///
/// Register a new account and return 201 with an access token for it.
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<RegisterAccount>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let account = state.registrar.register(input).await?;

    let ttl = state.tokens.ttl();
    let token = state
        .tokens
        .issue(&account.username, CustomClaims::new(), ttl)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            username: account.username,
            message: "User created".to_string(),
            token,
            expires_in: ttl.num_seconds(),
        }),
    ))
}

/// GET /api/auth/me
///
/// Return the account behind the presented Bearer token.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<SessionResponse>> {
    // A valid token for an account that no longer exists authenticates nobody.
    let account = state
        .accounts
        .find_by_username(&auth_user.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %auth_user.username, "Token subject has no account");
            AppError::unauthenticated()
        })?;

    Ok(Json(SessionResponse {
        account: AccountResponse::from(&account),
        issued_at: auth_user.claims.issued_at(),
        expires_at: auth_user.claims.expires_at(),
        claims: auth_user.claims.custom,
    }))
}
