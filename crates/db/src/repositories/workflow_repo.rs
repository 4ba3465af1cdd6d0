//! Repository for the `workflow` table.

use flowline_core::workflow::WorkflowStep;
use sqlx::{PgExecutor, PgPool};

use crate::models::workflow::Workflow;

/// Column list for `workflow` queries.
const COLUMNS: &str = "id, tenant_id, workflow, created_at";

/// Provides access to workflow definitions. Definitions are insert-only.
pub struct WorkflowRepo;

impl WorkflowRepo {
    /// Insert a new definition and return the stored row.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
        tenant_id: &str,
        steps: &[WorkflowStep],
    ) -> Result<Workflow, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow (id, tenant_id, workflow) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workflow>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(sqlx::types::Json(steps))
            .fetch_one(executor)
            .await
    }

    /// Fetch a definition by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflow WHERE id = $1");
        sqlx::query_as::<_, Workflow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List definitions in creation order. `skip`/`limit` are expected to be
    /// pre-clamped by the caller (the API caps `limit` at 200).
    pub async fn list(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<Workflow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow \
             ORDER BY created_at, id \
             OFFSET $1 LIMIT $2"
        );
        sqlx::query_as::<_, Workflow>(&query)
            .bind(skip)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
