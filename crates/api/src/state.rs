use std::sync::Arc;

use flowline_broker::Publisher;

use crate::config::ApiConfig;

/// Shared application state available to all axum handlers via
/// `State<AppState>`. Cheaply cloneable: inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flowline_db::DbPool,
    /// Server configuration.
    pub config: Arc<ApiConfig>,
    /// Broker publisher for event broadcasts and job enqueueing.
    pub publisher: Arc<Publisher>,
}
