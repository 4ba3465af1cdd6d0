//! Workflow result entity.

use flowline_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `workflow_result` table.
///
/// `workflow_result` holds one opaque record per executed step, in execution
/// order. `workflow_id` is a weak reference: results outlive nothing and are
/// never joined back to the definition beyond lookup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowResult {
    pub id: String,
    pub workflow_id: String,
    pub workflow_result: sqlx::types::Json<Vec<serde_json::Value>>,
    pub created_at: Timestamp,
}
