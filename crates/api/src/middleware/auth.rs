//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use streamer_core::error::CoreError;

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from `Authorization: Bearer <token>`.
///
/// Add it as a handler argument to require authentication:
///
/// ```ignore
/// async fn whoami(user: AuthUser) -> String {
///     user.username
/// }
/// ```
///
/// Every token failure (bad signature, malformed, expired) is answered with
/// the same 401; the specific reason only goes to the log.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The verified subject (`claims.sub`).
    pub username: String,
    /// The full verified claim set.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.tokens.verify(token)?;

        Ok(AuthUser {
            username: claims.sub.clone(),
            claims,
        })
    }
}

/// The raw token from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let unauthorized = |msg: &str| AppError::Core(CoreError::Unauthorized(msg.into()));

    let value = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}
