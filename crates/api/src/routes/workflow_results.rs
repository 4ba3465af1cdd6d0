//! Routes for the workflow-result resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workflow_results;
use crate::state::AppState;

/// ```text
/// GET /workflow-result-list -> list_workflow_results
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/workflow-result-list",
        get(workflow_results::list_workflow_results),
    )
}
