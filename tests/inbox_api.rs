mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

use common::{auth_token, body_json, build_app, delete, get, patch_json, post_json, send};

#[sqlx::test(migrations = "./migrations")]
async fn contact_form_is_public_and_starts_as_new(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(
        &app,
        post_json(
            "/api/contact",
            json!({
                "name": "Jane Visitor",
                "email": "jane@example.com",
                "phone": "+44 1234 567890",
                "message": "Do you run private gorilla treks?"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "new");
    assert_eq!(body["name"], "Jane Visitor");
}

#[sqlx::test(migrations = "./migrations")]
async fn contact_form_requires_name_email_and_message(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(
        &app,
        post_json(
            "/api/contact",
            json!({ "name": "Jane", "email": "jane@example.com" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Name, email, and message are required"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn contact_inbox_is_console_only(pool: SqlitePool) {
    let app = build_app(pool);

    let unauthenticated = send(&app, get("/api/contact", None)).await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let token = auth_token(&app).await;
    send(
        &app,
        post_json(
            "/api/contact",
            json!({ "name": "Jane", "email": "jane@example.com", "message": "Hi" }),
            None,
        ),
    )
    .await;

    let listed = send(&app, get("/api/contact", Some(&token))).await;
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(body_json(listed).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn contact_status_transitions_are_validated(pool: SqlitePool) {
    let app = build_app(pool);
    let token = auth_token(&app).await;

    let created = send(
        &app,
        post_json(
            "/api/contact",
            json!({ "name": "Jane", "email": "jane@example.com", "message": "Hi" }),
            None,
        ),
    )
    .await;
    let id = body_json(created).await["id"].as_str().unwrap().to_string();

    let updated = send(
        &app,
        patch_json(
            &format!("/api/contact/{id}/status"),
            json!({ "status": "read" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["status"], "read");

    let invalid = send(
        &app,
        patch_json(
            &format!("/api/contact/{id}/status"),
            json!({ "status": "archived" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(invalid).await["error"], "Invalid status");

    let removed = send(&app, delete(&format!("/api/contact/{id}"), Some(&token))).await;
    assert_eq!(removed.status(), StatusCode::OK);
    assert_eq!(
        body_json(removed).await["message"],
        "Submission deleted successfully"
    );
}

fn booking_payload() -> serde_json::Value {
    json!({
        "packageId": "pkg-1",
        "packageTitle": "Gorilla Trek",
        "customerName": "Jane Visitor",
        "email": "jane@example.com",
        "phone": "+44 1234 567890",
        "preferredDate": "2026-09-15",
        "numberOfPeople": "2",
        "specialRequests": "Vegetarian meals"
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn booking_inquiry_is_public_and_starts_pending(pool: SqlitePool) {
    let app = build_app(pool);

    let response = send(&app, post_json("/api/bookings", booking_payload(), None)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["packageTitle"], "Gorilla Trek");
    assert_eq!(body["numberOfPeople"], "2");
}

#[sqlx::test(migrations = "./migrations")]
async fn booking_accepts_a_missing_package_title(pool: SqlitePool) {
    let app = build_app(pool);

    let mut payload = booking_payload();
    payload.as_object_mut().unwrap().remove("packageTitle");

    let response = send(&app, post_json("/api/bookings", payload, None)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["packageTitle"], "");
    assert_eq!(body["status"], "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn booking_requires_all_fields_including_party_size(pool: SqlitePool) {
    let app = build_app(pool);

    let mut payload = booking_payload();
    payload.as_object_mut().unwrap().remove("numberOfPeople");

    let response = send(&app, post_json("/api/bookings", payload, None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "All required fields must be provided"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn booking_listing_filters_by_status(pool: SqlitePool) {
    let app = build_app(pool);
    let token = auth_token(&app).await;

    let first = body_json(send(&app, post_json("/api/bookings", booking_payload(), None)).await).await;
    send(&app, post_json("/api/bookings", booking_payload(), None)).await;

    let id = first["id"].as_str().unwrap();
    let confirmed = send(
        &app,
        patch_json(
            &format!("/api/bookings/{id}/status"),
            json!({ "status": "confirmed" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(confirmed.status(), StatusCode::OK);
    assert_eq!(body_json(confirmed).await["status"], "confirmed");

    let pending = body_json(send(&app, get("/api/bookings?status=pending", Some(&token))).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let all = body_json(send(&app, get("/api/bookings", Some(&token))).await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn booking_fetch_and_delete_are_console_only(pool: SqlitePool) {
    let app = build_app(pool);
    let token = auth_token(&app).await;

    let created = body_json(send(&app, post_json("/api/bookings", booking_payload(), None)).await).await;
    let id = created["id"].as_str().unwrap().to_string();

    let unauthenticated = send(&app, get(&format!("/api/bookings/{id}"), None)).await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let fetched = send(&app, get(&format!("/api/bookings/{id}"), Some(&token))).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["id"], id.as_str());

    let invalid = send(
        &app,
        patch_json(
            &format!("/api/bookings/{id}/status"),
            json!({ "status": "done" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(invalid).await["error"], "Invalid status");

    let removed = send(&app, delete(&format!("/api/bookings/{id}"), Some(&token))).await;
    assert_eq!(removed.status(), StatusCode::OK);
    assert_eq!(
        body_json(removed).await["message"],
        "Booking deleted successfully"
    );

    let gone = send(&app, get(&format!("/api/bookings/{id}"), Some(&token))).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(gone).await["error"], "Booking not found");
}
