use axum::{Json, extract::State};
use sqlx::SqlitePool;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{CmsSettings, UpdateSettingsRequest};
use crate::repository::settings;

/// Get Settings
///
/// Returns the singleton site settings row. 404 until the first save.
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current settings", body = CmsSettings),
        (status = 404, description = "No settings saved yet")
    )
)]
pub async fn get(State(pool): State<SqlitePool>) -> Result<Json<CmsSettings>, ApiError> {
    let row = settings::get(&pool)
        .await?
        .ok_or(ApiError::NotFound("Settings"))?;
    Ok(Json(row))
}

/// Update Settings
///
/// Merges the provided fields into the singleton row, creating it with
/// defaults on first save.
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "settings",
    request_body = UpdateSettingsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated settings", body = CmsSettings),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn update(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<CmsSettings>, ApiError> {
    let row = settings::upsert(&pool, payload).await?;
    Ok(Json(row))
}
