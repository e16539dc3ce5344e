use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// ApiError
///
/// The application-wide error taxonomy. Repository and auth failures surface
/// as-is to the HTTP boundary, which maps each variant to a status code here.
/// Every response body has the shape `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required fields in a request body.
    #[error("{0}")]
    Validation(String),

    /// Login failed. The message is deliberately identical for an unknown
    /// username and a wrong password so accounts cannot be enumerated.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The token signature did not verify against the configured secret.
    #[error("Invalid token")]
    InvalidToken,

    /// The token is past its validity window.
    #[error("Token expired")]
    TokenExpired,

    /// The token is not structurally a JWT at all.
    #[error("Malformed token")]
    MalformedToken,

    /// No row for the requested id. Carries the resource's display name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Registration collided with an existing username or email.
    #[error("Username or email already in use")]
    DuplicateUser,

    /// Unexpected store or runtime failure. The client receives a sanitized
    /// message; the detail is logged server-side only.
    #[error("Internal server error")]
    Internal(#[from] sqlx::Error),
}

impl ApiError {
    /// Shorthand for the standard message used by every create endpoint when
    /// a required field is absent or empty.
    pub fn missing_fields() -> Self {
        Self::Validation("All required fields must be provided".to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::MalformedToken => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateUser => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            // Full detail stays in the logs; the body carries a generic line.
            tracing::error!("internal error: {:?}", e);
        }

        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
