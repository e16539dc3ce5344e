use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::{delete, get, patch, post},
};
use sqlx::SqlitePool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod repository;

// HTTP surface: one module per resource family.
pub mod routes;
use routes::catalog;

// --- Public Re-exports ---

// Makes core types easily accessible to the entry points (main.rs, seed).
pub use config::AppConfig;
pub use error::ApiError;
pub use rate_limit::{RateLimiterLayer, api_rate_limiter};
pub use repository::{CatalogResource, Resource};

use models::{
    BlogArticle, Category, Creditation, Faq, GalleryImage, Partner, TravelPackage,
};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application, served at `/api-docs/openapi.json`. The generic catalog
/// handlers are registered per resource through their schemas; the concrete
/// handlers carry `#[utoipa::path]` annotations.
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        routes::auth::login, routes::auth::register,
        routes::settings::get, routes::settings::update,
        routes::contact::submit, routes::contact::list,
        routes::contact::set_status, routes::contact::remove,
        routes::bookings::submit, routes::bookings::list, routes::bookings::fetch,
        routes::bookings::set_status, routes::bookings::remove,
    ),
    components(
        schemas(
            models::AdminUser, models::LoginRequest, models::RegisterRequest,
            models::AuthResponse,
            models::TravelPackage, models::CreatePackageRequest, models::UpdatePackageRequest,
            models::BlogArticle, models::CreateArticleRequest, models::UpdateArticleRequest,
            models::GalleryImage, models::CreateGalleryImageRequest,
            models::UpdateGalleryImageRequest,
            models::Faq, models::CreateFaqRequest, models::UpdateFaqRequest,
            models::Partner, models::CreatePartnerRequest, models::UpdatePartnerRequest,
            models::Category, models::CreateCategoryRequest, models::UpdateCategoryRequest,
            models::Creditation, models::CreateCreditationRequest,
            models::UpdateCreditationRequest,
            models::CmsSettings, models::UpdateSettingsRequest,
            models::ContactSubmission, models::CreateContactRequest, models::ContactStatus,
            models::BookingInquiry, models::CreateBookingRequest, models::BookingStatus,
            models::UpdateStatusRequest, models::DeleteResponse,
        )
    ),
    tags(
        (name = "tour-portal", description = "Tour operator portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding the services every
/// request needs: the connection pool and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool shared by all handlers.
    pub pool: SqlitePool,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Allow handlers to selectively pull components from the shared AppState.

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> SqlitePool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// Builds the five-route CRUD surface for one catalog resource. Listing and
/// single fetch are public; create, update and delete require a bearer token
/// via the `AuthUser` argument on their handlers.
fn resource_routes<R: CatalogResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list::<R>).post(catalog::create::<R>))
        .route(
            "/{id}",
            get(catalog::fetch::<R>)
                .put(catalog::update::<R>)
                .delete(catalog::remove::<R>),
        )
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state. The rate limiter
/// is injected so tests can run the router without one.
pub fn create_router(state: AppState, limiter: Option<RateLimiterLayer>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let mut api = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/register", post(routes::auth::register))
        .nest("/packages", resource_routes::<TravelPackage>())
        .nest("/articles", resource_routes::<BlogArticle>())
        .nest("/gallery", resource_routes::<GalleryImage>())
        .nest("/faqs", resource_routes::<Faq>())
        .nest("/partners", resource_routes::<Partner>())
        .nest("/categories", resource_routes::<Category>())
        .nest("/creditations", resource_routes::<Creditation>())
        .route(
            "/settings",
            get(routes::settings::get).put(routes::settings::update),
        )
        .route(
            "/contact",
            post(routes::contact::submit).get(routes::contact::list),
        )
        .route("/contact/{id}", delete(routes::contact::remove))
        .route("/contact/{id}/status", patch(routes::contact::set_status))
        .route(
            "/bookings",
            post(routes::bookings::submit).get(routes::bookings::list),
        )
        .route(
            "/bookings/{id}",
            get(routes::bookings::fetch).delete(routes::bookings::remove),
        )
        .route("/bookings/{id}/status", patch(routes::bookings::set_status));

    // Rate limiting covers the API surface only; health and docs stay open.
    if let Some(limiter) = limiter {
        api = api.layer(limiter);
    }

    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health))
        .nest("/api", api)
        .with_state(state);

    // Observability and correlation layers, applied outermost.
    base_router
        .layer(
            ServiceBuilder::new()
                // Request ID generation: a unique UUID for every request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Request tracing: wraps the request/response lifecycle in a
                // span carrying the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Return the generated x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// Customizes span creation for `TraceLayer`: every log line for a request is
/// correlated by the request ID alongside the method and URI.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
