use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state, loaded once at startup
/// and shared immutably through the application state. Components receive it
/// by reference instead of reading environment variables themselves.
#[derive(Clone)]
pub struct AppConfig {
    /// SQLite connection string.
    pub db_url: String,
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// True when `jwt_secret` is the hardcoded development fallback.
    pub jwt_secret_is_fallback: bool,
    /// TCP port the HTTP server binds to.
    pub port: u16,
    /// Runtime environment marker, selects log output format.
    pub env: Env,
}

/// Env
///
/// Runtime context switch between development conveniences (pretty logs,
/// default database path) and production behavior (JSON logs, mandatory
/// secrets).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Fallback signing secret used when JWT_SECRET is unset in a local
/// environment. Never accepted in production.
const DEV_JWT_SECRET: &str = "dev-secret-key-change-in-production";

impl Default for AppConfig {
    /// Non-panicking configuration for test setup. No environment variables
    /// are consulted.
    fn default() -> Self {
        Self {
            db_url: "sqlite::memory:".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_secret_is_fallback: true,
            port: 3001,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// Initializes configuration from the process environment.
    ///
    /// # Panics
    /// Panics if a variable required for the current runtime environment is
    /// missing: in production both DATABASE_URL and JWT_SECRET must be set
    /// explicitly.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let (jwt_secret, jwt_secret_is_fallback) = match env {
            Env::Production => (
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production."),
                false,
            ),
            Env::Local => match env::var("JWT_SECRET") {
                Ok(secret) => (secret, false),
                Err(_) => (DEV_JWT_SECRET.to_string(), true),
            },
        };

        let db_url = match env {
            Env::Production => {
                env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in production")
            }
            // `mode=rwc` creates the file on first run.
            Env::Local => env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://tour_portal.db?mode=rwc".to_string()),
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        Self {
            db_url,
            jwt_secret,
            jwt_secret_is_fallback,
            port,
            env,
        }
    }

    /// Emits startup warnings for insecure configuration. Called after the
    /// tracing subscriber is installed so the messages are not lost.
    pub fn log_startup_warnings(&self) {
        if self.jwt_secret_is_fallback {
            tracing::warn!(
                "Using the default development JWT secret. Set JWT_SECRET before deploying."
            );
        }
    }
}
