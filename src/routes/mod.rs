use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod contact;
pub mod settings;

/// Health Check
///
/// Liveness probe. Returns a static status and the current server time.
#[utoipa::path(
    get,
    path = "/health",
    tag = "meta",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
