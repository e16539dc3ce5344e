use axum::{Json, extract::State, http::StatusCode};

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::repository::users;
use crate::AppState;

/// Login
///
/// Exchanges credentials for a bearer token. The failure message is identical
/// whether the username is unknown or the password is wrong.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ApiError::missing_fields());
    };
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::missing_fields());
    }

    let user = users::get_by_username(&state.pool, &username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_token(&state.config, user.id, &user.role)?;

    tracing::info!(username = %user.username, "login");
    Ok(Json(AuthResponse { token, user }))
}

/// Register
///
/// Creates a CMS account and logs it in immediately. The role defaults to
/// 'editor' when not supplied.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Username or email already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(ApiError::missing_fields());
    };
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::missing_fields());
    }

    if users::exists(&state.pool, &username, &email).await? {
        return Err(ApiError::DuplicateUser);
    }

    let password_hash = hash_password(&password)?;
    let role = payload.role.unwrap_or_else(|| "editor".to_string());
    let user = users::create(&state.pool, &username, &email, &password_hash, &role).await?;

    let token = issue_token(&state.config, user.id, &user.role)?;

    tracing::info!(username = %user.username, role = %user.role, "account registered");
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}
