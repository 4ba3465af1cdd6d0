//! Handlers for the job resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use flowline_broker::PublishBody;
use flowline_core::events::{ExecuteWorkflowJob, EXECUTE_WORKFLOW_EXCHANGE, TRIGGER_WORKFLOW_EXCHANGE};
use flowline_core::types::new_record_id;
use flowline_core::CoreError;
use flowline_db::models::job::{Job, JobState};
use flowline_db::repositories::JobRepo;
use serde::Serialize;
use serde_json::Value;

use crate::broadcast::broadcast_event_best_effort;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response shape for `GET /job/status/{job_id}`.
///
/// `state` and `status` surface the same label (the runner historically
/// exposed both aliases). `result` is non-null only once the job is
/// terminal: the stored report for SUCCESS, the error detail for FAILURE.
#[derive(Debug, Serialize)]
pub struct JobOut {
    pub job_id: String,
    pub state: String,
    pub status: String,
    pub result: Option<Value>,
}

/// Response shape for `GET /job/list` entries.
#[derive(Debug, Serialize)]
pub struct JobListItem {
    pub job_id: String,
    pub state: String,
    pub status: String,
}

fn job_to_out(job: Job) -> JobOut {
    let result = match job.job_state() {
        JobState::Success => job.result,
        JobState::Failure => Some(Value::String(
            job.error_message
                .unwrap_or_else(|| "Execution failed".to_string()),
        )),
        JobState::Pending | JobState::Started => None,
    };
    JobOut {
        job_id: job.id,
        state: job.state.clone(),
        status: job.state,
        result,
    }
}

/// POST /job/workflow-trigger/{id}
///
/// Enqueue an asynchronous execution of workflow `id` and answer
/// immediately with the assigned job id.
///
/// The workflow's existence is not checked here: an unknown id is accepted
/// and the job fails during execution, visible via the status lookup. The
/// enqueue publish is the hard dependency; if it fails the job row is
/// marked FAILURE and the request answers 500. The `trigger_workflow`
/// broadcast is observational and best-effort, so a broadcast failure never
/// masks a successfully enqueued job.
pub async fn trigger_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let job_id = new_record_id();
    JobRepo::insert(&state.pool, &job_id, &id).await?;

    let request = ExecuteWorkflowJob {
        workflow_id: id.clone(),
        job_id: job_id.clone(),
    };
    let body = serde_json::to_value(&request)
        .map_err(|e| AppError::Internal(format!("Failed to encode execution request: {e}")))?;

    if let Err(e) = state
        .publisher
        .publish(EXECUTE_WORKFLOW_EXCHANGE, PublishBody::Json(body))
        .await
    {
        tracing::error!(
            workflow_id = %id,
            job_id = %job_id,
            error = %e,
            "Failed to enqueue workflow execution",
        );
        if let Err(mark_err) =
            JobRepo::fail(&state.pool, &job_id, "Failed to enqueue execution request").await
        {
            tracing::error!(job_id = %job_id, error = %mark_err, "Failed to mark job as failed");
        }
        return Err(AppError::Broker(e));
    }

    tracing::info!(workflow_id = %id, job_id = %job_id, "Workflow execution enqueued");

    broadcast_event_best_effort(
        &state.publisher,
        TRIGGER_WORKFLOW_EXCHANGE,
        serde_json::json!({"workflow_id": id, "job_id": job_id}),
    )
    .await;

    Ok(axum::Json(serde_json::json!({"job_id": job_id})))
}

/// GET /job/status/{job_id}
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_by_id(&state.pool, &job_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        })?;
    Ok(axum::Json(job_to_out(job)))
}

/// GET /job/list
///
/// Every known job with its current state. O(n) over the job namespace;
/// there is no pagination or expiry at this layer.
pub async fn list_jobs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let jobs = JobRepo::list(&state.pool).await?;
    let items: Vec<JobListItem> = jobs
        .into_iter()
        .map(|job| JobListItem {
            job_id: job.id,
            state: job.state.clone(),
            status: job.state,
        })
        .collect();
    Ok(axum::Json(items))
}
