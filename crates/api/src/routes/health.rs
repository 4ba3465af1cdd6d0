//! Liveness probe.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// GET /health
async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({"status": "ok"}))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
