//! HTTP error mapping.
//!
//! Every failure a handler can return becomes an [`AppError`], rendered as
//! `{"error": <message>, "code": <CODE>}` with a matching status. Server-side
//! failures are logged in full and answered with a fixed message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use streamer_core::error::CoreError;
use streamer_db::store::StoreError;

use crate::auth::registrar::RegistrationError;
use crate::auth::token::TokenError;

/// Message returned for every rejected token, whatever the reason.
pub const UNAUTHENTICATED_MESSAGE: &str = "Invalid or expired token";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `streamer_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An account store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The request body could not be read.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn unauthenticated() -> Self {
        AppError::Core(CoreError::Unauthorized(UNAUTHENTICATED_MESSAGE.into()))
    }

    /// Status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Store(StoreError::UniqueViolation { constraint }) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Store(_) | AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            ),
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::InvalidInput(msg) => AppError::Core(CoreError::Validation(msg)),
            err @ (RegistrationError::DuplicateUsername(_)
            | RegistrationError::DuplicateEmail(_)) => {
                AppError::Core(CoreError::Conflict(err.to_string()))
            }
            RegistrationError::StoreUnavailable(store) => AppError::Store(store),
            RegistrationError::Hashing(msg) => AppError::InternalError(msg),
        }
    }
}

impl From<TokenError> for AppError {
    /// Rejected tokens collapse into one 401; the specific reason is only logged.
    fn from(err: TokenError) -> Self {
        if err.is_rejection() {
            tracing::warn!(reason = %err, "Token rejected");
            AppError::unauthenticated()
        } else {
            AppError::InternalError(err.to_string())
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(ErrorBody { error, code })).into_response()
    }
}
