//! Handlers for the workflow-result resource.

use axum::extract::State;
use axum::response::IntoResponse;
use flowline_db::repositories::WorkflowResultRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /workflow-result-list
///
/// All stored execution results, oldest first.
pub async fn list_workflow_results(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let results = WorkflowResultRepo::list(&state.pool).await?;
    Ok(axum::Json(results))
}
