//! Repository for the `workflow_result` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::workflow_result::WorkflowResult;

/// Column list for `workflow_result` queries.
const COLUMNS: &str = "id, workflow_id, workflow_result, created_at";

/// Provides access to execution results. Results are insert-only.
pub struct WorkflowResultRepo;

impl WorkflowResultRepo {
    /// Insert a result row holding the ordered per-step records.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
        workflow_id: &str,
        records: &[serde_json::Value],
    ) -> Result<WorkflowResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_result (id, workflow_id, workflow_result) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowResult>(&query)
            .bind(id)
            .bind(workflow_id)
            .bind(sqlx::types::Json(records))
            .fetch_one(executor)
            .await
    }

    /// List all result rows in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<WorkflowResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflow_result ORDER BY created_at, id");
        sqlx::query_as::<_, WorkflowResult>(&query)
            .fetch_all(pool)
            .await
    }
}
