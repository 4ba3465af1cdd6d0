use flowline_engine::TextGenConfig;

/// Worker configuration loaded from environment variables.
///
/// Connection URLs are required; the process fails fast at startup when
/// they are absent.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Postgres connection URL (required).
    pub database_url: String,
    /// AMQP broker URL (required).
    pub broker_url: String,
    /// Text-generation endpoint configuration.
    pub textgen: TextGenConfig,
}

impl WorkerConfig {
    /// Load configuration from `DATABASE_URL`, `BROKER_URL`, and the
    /// `TEXTGEN_*` variables.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            broker_url: std::env::var("BROKER_URL").expect("BROKER_URL must be set"),
            textgen: TextGenConfig::from_env(),
        }
    }
}
