use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::AppConfig, error::ApiError};

/// Token validity window in seconds (7 days). Tokens are stateless; the only
/// way to invalidate one earlier is for the client to discard it.
const TOKEN_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims
///
/// Payload signed into every bearer token. The role travels in the claim so
/// protected requests resolve the caller's identity without a database
/// round trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the admin user's UUID.
    pub sub: Uuid,
    /// 'admin' or 'editor'.
    pub role: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp. Requests past this point are rejected.
    pub exp: usize,
}

/// Signs a time-bounded token for the given subject and role.
pub fn issue_token(config: &AppConfig, subject: Uuid, role: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: subject,
        role: role.to_string(),
        iat: now as usize,
        exp: (now + TOKEN_VALIDITY_SECS) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|_| ApiError::InvalidToken)
}

/// Verifies a token's signature and validity window and returns its claims.
///
/// Failure modes map onto the error taxonomy: a bad signature is
/// `InvalidToken`, a stale token is `TokenExpired`, and anything that does not
/// parse as a JWT is `MalformedToken`.
pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, ApiError> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(ApiError::TokenExpired),
            ErrorKind::InvalidSignature => Err(ApiError::InvalidToken),
            // Anything that failed before signature verification (wrong
            // segment count, bad base64, undecodable claims) is structural.
            _ => Err(ApiError::MalformedToken),
        },
    }
}

/// Hashes a password with Argon2id and a random salt, returning the
/// PHC-formatted string (algorithm, parameters and salt embedded).
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::Validation("Failed to hash password".to_string()))
}

/// Compares a plaintext password against a stored PHC hash. Never an equality
/// check on plaintext.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// AuthUser
///
/// The resolved identity of an authenticated request, produced by the bearer
/// token extractor below. Handlers that require authentication take this as
/// an argument; requests without a valid token never reach them.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::MalformedToken)?;

        let claims = verify_token(&config, token)?;

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn issued_token_verifies_to_same_subject_and_role() {
        let config = test_config();
        let subject = Uuid::new_v4();

        let token = issue_token(&config, subject, "admin").expect("token should issue");
        let claims = verify_token(&config, &token).expect("token should verify");

        assert_eq!(claims.sub, subject);
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "a-completely-different-secret".to_string();

        let token = issue_token(&other, Uuid::new_v4(), "editor").unwrap();
        let err = verify_token(&config, &token).unwrap_err();

        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let config = test_config();
        // Sign claims whose window closed an hour ago, beyond the default
        // validation leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: "admin".to_string(),
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&config, &token).unwrap_err();
        assert!(matches!(err, ApiError::TokenExpired));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let config = test_config();
        let err = verify_token(&config, "not-a-jwt-at-all").unwrap_err();
        assert!(matches!(err, ApiError::MalformedToken));
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("secret123").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn two_hashes_of_same_password_differ() {
        // Random salts: equal inputs must not produce equal hashes.
        let a = hash_password("secret123").unwrap();
        let b = hash_password("secret123").unwrap();
        assert_ne!(a, b);
    }
}
