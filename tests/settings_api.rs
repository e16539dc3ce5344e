mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

use common::{auth_token, body_json, build_app, get, put_json, send};

#[sqlx::test(migrations = "./migrations")]
async fn settings_are_not_found_before_first_save(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(&app, get("/api/settings", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Settings not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn updating_settings_requires_a_token(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(
        &app,
        put_json("/api/settings", json!({ "companyName": "X" }), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn first_save_creates_the_singleton_with_defaults(pool: SqlitePool) {
    let app = build_app(pool.clone());
    let token = auth_token(&app).await;

    let response = send(
        &app,
        put_json(
            "/api/settings",
            json!({ "companyEmail": "hello@savannatrails.example" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["companyEmail"], "hello@savannatrails.example");
    // Fields not provided are filled with defaults, not left null.
    assert!(!body["companyName"].as_str().unwrap().is_empty());

    // Readable publicly afterwards.
    let fetched = send(&app, get("/api/settings", None)).await;
    assert_eq!(fetched.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn repeated_saves_merge_into_a_single_row(pool: SqlitePool) {
    let app = build_app(pool.clone());
    let token = auth_token(&app).await;

    send(
        &app,
        put_json(
            "/api/settings",
            json!({ "companyName": "Savanna Trails", "companyPhone": "+256 700 000 000" }),
            Some(&token),
        ),
    )
    .await;

    let second = send(
        &app,
        put_json(
            "/api/settings",
            json!({ "whatsappNumber": "+256 701 111 111" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);

    let body = body_json(second).await;
    // Merge: the new field lands, earlier values survive.
    assert_eq!(body["whatsappNumber"], "+256 701 111 111");
    assert_eq!(body["companyName"], "Savanna Trails");
    assert_eq!(body["companyPhone"], "+256 700 000 000");

    // Still exactly one row.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cms_settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
