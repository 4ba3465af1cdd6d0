//! Top-level router assembly.

use axum::Router;

use crate::routes;
use crate::state::AppState;

/// Assemble all resource routers. Paths are mounted flat (no version
/// prefix), matching the public surface.
pub fn app_router() -> Router<AppState> {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::workflows::router())
        .merge(routes::workflow_results::router())
        .merge(routes::jobs::router())
}
