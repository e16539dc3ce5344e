//! Typed HTTP client for the portal API, used by tooling and site builds that
//! consume the same endpoints as the browser.

use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::models::{AuthResponse, DeleteResponse, LoginRequest, RegisterRequest};

/// ClientError
///
/// Failures surfaced by [`ApiClient`]: either the server answered with an
/// error envelope, or the request never completed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response. Carries the status and the server's `error` message.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Connection, timeout or body decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// ApiClient
///
/// Thin facade over the HTTP API. Holds the base URL and, after a successful
/// login or register, the bearer token attached to subsequent requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// The bearer token currently attached to requests, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Attach a previously obtained token, e.g. one restored from storage.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the stored token. Purely client-side; the token itself stays
    /// valid until it expires.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Authenticates and stores the returned token for subsequent calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        };
        let auth: AuthResponse = self.request(Method::POST, "/api/auth/login", Some(&body)).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Registers an account and stores the returned token.
    pub async fn register(&mut self, payload: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let auth: AuthResponse = self
            .request(Method::POST, "/api/auth/register", Some(payload))
            .await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// GET a single resource or listing.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None::<&Value>).await
    }

    /// GET a listing, swallowing failures into an empty list. Used by site
    /// builds where a missing section should render empty rather than abort.
    pub async fn list_or_empty<T: DeserializeOwned>(&self, path: &str) -> Vec<T> {
        match self.get::<Vec<T>>(path).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path, error = %e, "listing failed, returning empty");
                Vec::new()
            }
        }
    }

    /// POST a new resource.
    pub async fn create<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT a partial update.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// PATCH, used by the status endpoints.
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str) -> Result<DeleteResponse, ClientError> {
        self.request(Method::DELETE, path, None::<&Value>).await
    }

    async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, &url);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            // Error bodies are `{"error": "..."}`; fall back to the raw text
            // when the server (or a proxy in front of it) sent something else.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            Err(ClientError::Api { status, message })
        }
    }
}
