use std::net::SocketAddr;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use tour_portal::{AppState, api_rate_limiter, config::{AppConfig, Env}, create_router};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = AppConfig::load();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    // Pretty logs locally, JSON lines in production.
    match config.env {
        Env::Local => tracing_subscriber::fmt().with_env_filter(filter).init(),
        Env::Production => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }

    config.log_startup_warnings();

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: failed to connect to the database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("FATAL: database migration failed");

    let port = config.port;
    let state = AppState { pool, config };
    let app = create_router(state, Some(api_rate_limiter()));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("FATAL: failed to bind server address");

    // Connect-info keeps the peer address available to the rate limiter for
    // clients that arrive without proxy headers.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("FATAL: server exited unexpectedly");
}
