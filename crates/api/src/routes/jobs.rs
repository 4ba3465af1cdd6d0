//! Routes for the job resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// ```text
/// POST /job/workflow-trigger/{id} -> trigger_workflow
/// GET  /job/status/{job_id}       -> job_status
/// GET  /job/list                  -> list_jobs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/job/workflow-trigger/{id}", post(jobs::trigger_workflow))
        .route("/job/status/{job_id}", get(jobs::job_status))
        .route("/job/list", get(jobs::list_jobs))
}
