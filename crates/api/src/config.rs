/// Server configuration loaded from environment variables.
///
/// Connection URLs are required: the process fails fast at startup when they
/// are absent rather than starting in a degraded mode. Everything else has
/// defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres connection URL (required).
    pub database_url: String,
    /// AMQP broker URL (required).
    pub broker_url: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default       |
    /// |------------------------|---------------|
    /// | `HOST`                 | `0.0.0.0`     |
    /// | `PORT`                 | `8000`        |
    /// | `CORS_ORIGINS`         | `*` disabled; comma-separated list |
    /// | `REQUEST_TIMEOUT_SECS` | `30`          |
    /// | `DATABASE_URL`         | (required)    |
    /// | `BROKER_URL`           | (required)    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let broker_url = std::env::var("BROKER_URL").expect("BROKER_URL must be set");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            broker_url,
        }
    }
}
