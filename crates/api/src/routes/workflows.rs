//! Routes for the workflow resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workflows;
use crate::state::AppState;

/// ```text
/// POST /workflow-create -> create_workflow
/// GET  /workflow-list   -> list_workflows
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workflow-create", post(workflows::create_workflow))
        .route("/workflow-list", get(workflows::list_workflows))
}
