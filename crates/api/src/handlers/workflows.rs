//! Handlers for the workflow resource.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use flowline_core::events::CREATE_WORKFLOW_EXCHANGE;
use flowline_core::types::new_record_id;
use flowline_core::CoreError;
use flowline_db::models::workflow::CreateWorkflow;
use flowline_db::repositories::WorkflowRepo;
use flowline_db::with_transaction;
use validator::Validate;

use crate::broadcast::broadcast_event_best_effort;
use crate::error::{AppResult, Json};
use crate::pagination::Pagination;
use crate::state::AppState;

/// POST /workflow-create
///
/// Persist a new definition and broadcast it on the `create_workflow`
/// exchange. The broadcast runs after commit and is best-effort: the
/// definition is already durable, so a broker failure is logged and the
/// request still answers 200 with the stored row.
pub async fn create_workflow(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkflow>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let id = new_record_id();
    let workflow = with_transaction(&state.pool, |tx| {
        let id = id.clone();
        let tenant_id = input.tenant_id.clone();
        let steps = input.workflow.clone();
        Box::pin(async move { WorkflowRepo::insert(&mut **tx, &id, &tenant_id, &steps).await })
    })
    .await?;

    tracing::info!(
        workflow_id = %workflow.id,
        tenant_id = %workflow.tenant_id,
        steps = workflow.workflow.0.len(),
        "Workflow created",
    );

    broadcast_event_best_effort(
        &state.publisher,
        CREATE_WORKFLOW_EXCHANGE,
        serde_json::json!({
            "id": workflow.id,
            "tenant_id": workflow.tenant_id,
            "workflow": workflow.workflow.0,
        }),
    )
    .await;

    Ok(axum::Json(workflow))
}

/// GET /workflow-list
///
/// List definitions in creation order. `limit` defaults to 100 and is
/// capped at 200 regardless of the requested value.
pub async fn list_workflows(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<impl IntoResponse> {
    let (skip, limit) = pagination.clamped();
    let workflows = WorkflowRepo::list(&state.pool, skip, limit).await?;
    Ok(axum::Json(workflows))
}
