#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hiit_api::auth::jwt::{generate_access_token, JwtConfig};
use hiit_api::config::ServerConfig;
use hiit_api::router::build_app_router;
use hiit_api::state::AppState;
use hiit_core::webhook::WebhookVerifier;

/// Secret shared by the test router and [`token_for`].
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Signing secret used by [`build_signed_test_app`]; base64 of `test-signing-key-0123456789`.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_dGVzdC1zaWduaW5nLWtleS0wMTIzNDU2Nzg5";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        webhook_signing_secret: None,
        allow_unsigned_users: true,
    }
}

/// Build the full application router over `pool`, with `POST /user`
/// accepting unsigned bodies.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        webhook_verifier: None,
    };
    build_app_router(state, &config)
}

/// Router with neither a signing secret nor the unsigned opt-in, as a
/// production deploy that forgot its secret would run.
pub fn build_unconfigured_test_app(pool: PgPool) -> Router {
    let mut config = test_config();
    config.allow_unsigned_users = false;
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        webhook_verifier: None,
    };
    build_app_router(state, &config)
}

/// Like [`build_test_app`] but `POST /user` requires a valid signature
/// under [`TEST_WEBHOOK_SECRET`].
pub fn build_signed_test_app(pool: PgPool) -> Router {
    let mut config = test_config();
    config.webhook_signing_secret = Some(TEST_WEBHOOK_SECRET.to_string());
    let verifier = WebhookVerifier::new(TEST_WEBHOOK_SECRET).unwrap();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        webhook_verifier: Some(Arc::new(verifier)),
    };
    build_app_router(state, &config)
}

/// Issue a valid access token for `user_id`.
pub fn token_for(user_id: &str) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        request(Method::POST, uri, None)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_raw_auth(app: Router, uri: &str, body: &'static str, token: &str) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(
        app,
        request(Method::PATCH, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
