//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /health   -> liveness text
/// POST /signup   -> signup
/// GET  /me       -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(auth::health))
        .route("/signup", post(auth::signup))
        .route("/me", get(auth::me))
}
