#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tanmia_api::auth::jwt::{generate_token, JwtConfig};
use tanmia_api::auth::password::hash_password;
use tanmia_api::config::ServerConfig;
use tanmia_api::router::build_app_router;
use tanmia_api::state::AppState;
use tanmia_db::models::user::{CreateUser, User};
use tanmia_db::storage::{MemStorage, Storage};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            token_expiry_hours: 24,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The store is returned alongside
/// the router so tests can seed data directly.
pub fn build_test_app() -> (Router, Arc<MemStorage>) {
    let config = test_config();
    let store = Arc::new(MemStorage::new());

    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
    };

    (build_app_router(state, &config), store)
}

/// Insert a user with a real argon2 hash, returning the stored row.
pub async fn seed_user(store: &dyn Storage, username: &str, password: &str, role: &str) -> User {
    let password_hash = hash_password(password).expect("hashing should succeed");
    store
        .create_user(&CreateUser {
            username: username.to_string(),
            password_hash,
            role: role.to_string(),
        })
        .await
        .expect("seeding a user should succeed")
}

/// Issue a token for a seeded user, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_token(user.id, &user.username, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Drive one request through the router.
async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

pub async fn get(app: &Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, "GET", path, token, None).await
}

pub async fn post_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(app, "POST", path, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(app, "PUT", path, token, Some(body)).await
}

pub async fn delete(app: &Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, "DELETE", path, token, None).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
