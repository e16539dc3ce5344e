//! Shared helpers for the integration tests: router construction and request
//! plumbing over `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

use tour_portal::{AppConfig, AppState, create_router};

/// Builds the full application router against a test pool. No rate limiter:
/// tests exercise endpoint semantics, not throttling.
pub fn build_app(pool: SqlitePool) -> Router {
    let state = AppState {
        pool,
        config: AppConfig::default(),
    };
    create_router(state, None)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should complete")
}

fn with_bearer(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    with_bearer(Request::builder().method("GET").uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    with_bearer(Request::builder().method("POST").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn put_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    with_bearer(Request::builder().method("PUT").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn patch_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    with_bearer(Request::builder().method("PATCH").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    with_bearer(Request::builder().method("DELETE").uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Registers a fresh admin account and returns its bearer token.
pub async fn auth_token(app: &Router) -> String {
    let response = send(
        app,
        post_json(
            "/api/auth/register",
            json!({
                "username": "admin",
                "email": "admin@example.com",
                "password": "admin123",
                "role": "admin"
            }),
            None,
        ),
    )
    .await;
    let body = body_json(response).await;
    body["token"]
        .as_str()
        .expect("registration should return a token")
        .to_string()
}
