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
    ContactStatus, ContactSubmission, CreateContactRequest, DeleteResponse, UpdateStatusRequest,
};
use crate::repository::{self, Resource, inbox};

fn parse_status(raw: Option<&str>) -> Result<ContactStatus, ApiError> {
    match raw {
        Some("new") => Ok(ContactStatus::New),
        Some("read") => Ok(ContactStatus::Read),
        Some("responded") => Ok(ContactStatus::Responded),
        _ => Err(ApiError::Validation("Invalid status".to_string())),
    }
}

/// Submit Contact Message
///
/// Public endpoint behind the site's contact form.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactSubmission),
        (status = 400, description = "Name, email, and message are required")
    )
)]
pub async fn submit(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactSubmission>), ApiError> {
    let row = inbox::insert_contact(&pool, payload).await?;
    tracing::info!(id = %row.id, "contact submission received");
    Ok((StatusCode::CREATED, Json(row)))
}

/// List Contact Messages
///
/// Full inbox, newest first. Console-only.
#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "contact",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All submissions", body = [ContactSubmission]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    let rows = repository::list::<ContactSubmission>(&pool, &params).await?;
    Ok(Json(rows))
}

/// Update Message Status
///
/// Moves a submission through new → read → responded. An unknown status
/// string is a 400.
#[utoipa::path(
    patch,
    path = "/api/contact/{id}/status",
    tag = "contact",
    request_body = UpdateStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated submission", body = ContactSubmission),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Submission not found")
    )
)]
pub async fn set_status(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let status = parse_status(payload.status.as_deref())?;
    let row = inbox::set_contact_status(&pool, id, status)
        .await?
        .ok_or(ApiError::NotFound(ContactSubmission::NAME))?;
    Ok(Json(row))
}

/// Delete Contact Message
#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    tag = "contact",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Deleted", body = DeleteResponse),
        (status = 404, description = "Submission not found")
    )
)]
pub async fn remove(
    _user: AuthUser,
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !repository::delete::<ContactSubmission>(&pool, id).await? {
        return Err(ApiError::NotFound(ContactSubmission::NAME));
    }
    Ok(Json(DeleteResponse {
        message: format!("{} deleted successfully", ContactSubmission::NAME),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_parse_to_variants() {
        assert_eq!(parse_status(Some("new")).unwrap(), ContactStatus::New);
        assert_eq!(parse_status(Some("read")).unwrap(), ContactStatus::Read);
        assert_eq!(
            parse_status(Some("responded")).unwrap(),
            ContactStatus::Responded
        );
    }

    #[test]
    fn unknown_or_missing_status_is_rejected() {
        assert!(parse_status(Some("archived")).is_err());
        assert!(parse_status(None).is_err());
    }
}
