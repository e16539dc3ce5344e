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
use crate::models::{
    BookingInquiry, BookingStatus, CreateBookingRequest, DeleteResponse, UpdateStatusRequest,
};
use crate::repository::{self, Resource, inbox};

fn parse_status(raw: Option<&str>) -> Result<BookingStatus, ApiError> {
    match raw {
        Some("pending") => Ok(BookingStatus::Pending),
        Some("confirmed") => Ok(BookingStatus::Confirmed),
        Some("cancelled") => Ok(BookingStatus::Cancelled),
        _ => Err(ApiError::Validation("Invalid status".to_string())),
    }
}

/// Submit Booking Inquiry
///
/// Public endpoint behind the package booking form. The package title is
/// denormalized into the inquiry so it survives package deletion.
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Inquiry stored", body = BookingInquiry),
        (status = 400, description = "All required fields must be provided")
    )
)]
pub async fn submit(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingInquiry>), ApiError> {
    let row = inbox::insert_booking(&pool, payload).await?;
    tracing::info!(id = %row.id, package = %row.package_title, "booking inquiry received");
    Ok((StatusCode::CREATED, Json(row)))
}

/// List Booking Inquiries
///
/// Newest first; `?status=pending` narrows to one workflow state.
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("status" = Option<String>, Query, description = "Filter by workflow state")),
    responses(
        (status = 200, description = "All inquiries", body = [BookingInquiry]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<BookingInquiry>>, ApiError> {
    let rows = repository::list::<BookingInquiry>(&pool, &params).await?;
    Ok(Json(rows))
}

/// Get Booking Inquiry
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The inquiry", body = BookingInquiry),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn fetch(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingInquiry>, ApiError> {
    let row = repository::get::<BookingInquiry>(&pool, id)
        .await?
        .ok_or(ApiError::NotFound(BookingInquiry::NAME))?;
    Ok(Json(row))
}

/// Update Booking Status
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    tag = "bookings",
    request_body = UpdateStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated inquiry", body = BookingInquiry),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn set_status(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<BookingInquiry>, ApiError> {
    let status = parse_status(payload.status.as_deref())?;
    let row = inbox::set_booking_status(&pool, id, status)
        .await?
        .ok_or(ApiError::NotFound(BookingInquiry::NAME))?;
    Ok(Json(row))
}

/// Delete Booking Inquiry
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Deleted", body = DeleteResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn remove(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !repository::delete::<BookingInquiry>(&pool, id).await? {
        return Err(ApiError::NotFound(BookingInquiry::NAME));
    }
    Ok(Json(DeleteResponse {
        message: format!("{} deleted successfully", BookingInquiry::NAME),
    }))
}
