//! Workflow definition entity and create DTO.

use flowline_core::types::Timestamp;
use flowline_core::workflow::WorkflowStep;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `workflow` table.
///
/// Definitions are immutable after insert: there is no update DTO and no
/// delete operation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workflow {
    pub id: String,
    pub tenant_id: String,
    pub workflow: sqlx::types::Json<Vec<WorkflowStep>>,
    pub created_at: Timestamp,
}

/// DTO for `POST /workflow-create`.
///
/// An empty `workflow` list is accepted; such a definition executes to an
/// empty result list.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkflow {
    #[validate(length(min = 1, max = 255, message = "tenant_id must be a non-empty string"))]
    pub tenant_id: String,
    pub workflow: Vec<WorkflowStep>,
}
