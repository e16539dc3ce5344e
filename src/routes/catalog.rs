//! Generic handlers for the seven catalog resources. Each is instantiated per
//! resource at router construction, so one implementation serves packages,
//! articles, gallery images, FAQs, partners, categories and creditations.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::DeleteResponse;
use crate::repository::{self, CatalogResource};

/// Lists every row, newest first. Public. A query-string key the resource
/// recognizes narrows the listing (e.g. `?category=wildlife` on packages).
pub async fn list<R: CatalogResource>(
    State(pool): State<SqlitePool>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<R>>, ApiError> {
    let rows = repository::list::<R>(&pool, &params).await?;
    Ok(Json(rows))
}

/// Fetches one row by id. Public.
pub async fn fetch<R: CatalogResource>(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<R>, ApiError> {
    let row = repository::get::<R>(&pool, id)
        .await?
        .ok_or(ApiError::NotFound(R::NAME))?;
    Ok(Json(row))
}

/// Creates a row after the resource's required-field check. Authenticated.
pub async fn create<R: CatalogResource>(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Json(payload): Json<R::Create>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    R::validate(&payload)?;
    let row = R::insert(&pool, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Merges provided fields into an existing row. Authenticated.
pub async fn update<R: CatalogResource>(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    Json(payload): Json<R::Update>,
) -> Result<Json<R>, ApiError> {
    let row = R::apply_update(&pool, id, payload)
        .await?
        .ok_or(ApiError::NotFound(R::NAME))?;
    Ok(Json(row))
}

/// Deletes a row by id. Authenticated.
pub async fn remove<R: CatalogResource>(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !repository::delete::<R>(&pool, id).await? {
        return Err(ApiError::NotFound(R::NAME));
    }
    Ok(Json(DeleteResponse {
        message: format!("{} deleted successfully", R::NAME),
    }))
}
