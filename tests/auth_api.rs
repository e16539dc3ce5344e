mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

use common::{body_json, build_app, get, post_json, send};

#[sqlx::test(migrations = "./migrations")]
async fn health_reports_ok(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn register_creates_account_and_returns_token(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(
        &app,
        post_json(
            "/api/auth/register",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "s3cret!"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "alice");
    // Role defaults to editor when not supplied.
    assert_eq!(body["user"]["role"], "editor");
    // The hash must never appear in a response.
    assert!(body["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn register_with_missing_fields_is_rejected(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(
        &app,
        post_json(
            "/api/auth/register",
            json!({ "username": "alice" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "All required fields must be provided");
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_or_email_conflicts(pool: SqlitePool) {
    let app = build_app(pool);

    let payload = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "s3cret!"
    });
    let first = send(&app, post_json("/api/auth/register", payload.clone(), None)).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same username, different email.
    let second = send(
        &app,
        post_json(
            "/api/auth/register",
            json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "s3cret!"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"], "Username or email already in use");

    // Different username, same email.
    let third = send(
        &app,
        post_json(
            "/api/auth/register",
            json!({
                "username": "bob",
                "email": "alice@example.com",
                "password": "s3cret!"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(third.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_round_trip(pool: SqlitePool) {
    let app = build_app(pool);

    send(
        &app,
        post_json(
            "/api/auth/register",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "s3cret!"
            }),
            None,
        ),
    )
    .await;

    let response = send(
        &app,
        post_json(
            "/api/auth/login",
            json!({ "username": "alice", "password": "s3cret!" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "alice");
}

#[sqlx::test(migrations = "./migrations")]
async fn login_failures_share_one_message(pool: SqlitePool) {
    let app = build_app(pool);

    send(
        &app,
        post_json(
            "/api/auth/register",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "s3cret!"
            }),
            None,
        ),
    )
    .await;

    // Wrong password for a known user.
    let wrong_password = send(
        &app,
        post_json(
            "/api/auth/login",
            json!({ "username": "alice", "password": "nope" }),
            None,
        ),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = body_json(wrong_password).await;

    // Unknown user entirely.
    let unknown_user = send(
        &app,
        post_json(
            "/api/auth/login",
            json!({ "username": "mallory", "password": "nope" }),
            None,
        ),
    )
    .await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body = body_json(unknown_user).await;

    // Identical bodies: the response must not reveal which part was wrong.
    assert_eq!(wrong_password_body["error"], "Invalid username or password");
    assert_eq!(wrong_password_body, unknown_user_body);
}

#[sqlx::test(migrations = "./migrations")]
async fn issued_token_is_accepted_on_protected_routes(pool: SqlitePool) {
    let app = build_app(pool);
    let token = common::auth_token(&app).await;

    let response = send(&app, get("/api/contact", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
}
