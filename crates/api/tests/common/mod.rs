#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use streamer_api::app::build_router;
use streamer_api::auth::token::{SigningSecret, TokenAuthority, TokenConfig};
use streamer_api::config::ServerConfig;
use streamer_api::state::AppState;
use streamer_core::clock::ManualClock;
use streamer_db::store::{AccountStore, InMemoryAccountStore};
use tower::ServiceExt;

/// A running test application plus handles to the pieces tests poke at.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryAccountStore>,
    pub clock: Arc<ManualClock>,
    pub tokens: Arc<TokenAuthority>,
}

impl TestApp {
    /// A fresh clone of the router, ready for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Token settings with a known 256-bit secret and a one-hour lifetime.
pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        secret: SigningSecret::from_bytes(*b"integration-test-secret-32-bytes").unwrap(),
        ttl: Duration::hours(1),
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        token: test_token_config(),
    }
}

/// Build the full application router over an in-memory account store and a
/// manual clock.
///
/// Uses the same `build_router` as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app() -> TestApp {
    build_test_app_with_store(Arc::new(InMemoryAccountStore::new()))
}

/// Like [`build_test_app`] but over a caller-supplied in-memory store.
pub fn build_test_app_with_store(store: Arc<InMemoryAccountStore>) -> TestApp {
    let config = test_config();
    let clock = Arc::new(ManualClock::starting_now());
    let tokens = TokenAuthority::with_clock(&config.token, clock.clone());

    let accounts: Arc<dyn AccountStore> = store.clone();
    let state = AppState::with_tokens(accounts, config, tokens);
    let tokens = Arc::clone(&state.tokens);
    let router = build_router(state).unwrap();

    TestApp {
        router,
        store,
        clock,
        tokens,
    }
}

/// Build the router over any account store (e.g. one that is down).
pub fn build_test_app_over(accounts: Arc<dyn AccountStore>) -> Router {
    build_router(AppState::new(accounts, test_config())).unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with a raw `Authorization` header value.
pub async fn get_with_authorization(app: Router, uri: &str, authorization: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    get_with_authorization(app, uri, &format!("Bearer {token}")).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
