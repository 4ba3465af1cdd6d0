//! Repository for the `jobs` table.
//!
//! Uses the [`JobState`] labels for all state transitions. No magic strings:
//! every state literal goes through the enum.

use sqlx::{PgExecutor, PgPool};

use crate::models::job::{Job, JobState};

/// Column list for `jobs` queries.
const COLUMNS: &str =
    "id, workflow_id, state, result, error_message, created_at, started_at, completed_at";

/// Provides CRUD operations for workflow execution jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job in `PENDING` state.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
        workflow_id: &str,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (id, workflow_id, state) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(workflow_id)
            .bind(JobState::Pending.as_str())
            .fetch_one(executor)
            .await
    }

    /// Move a job to `STARTED` when a worker picks it up.
    pub async fn mark_started(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE jobs SET state = $2, started_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(JobState::Started.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark a job as `SUCCESS` with its result payload.
    pub async fn complete<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
        result: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE jobs SET state = $2, result = $3, completed_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(JobState::Success.as_str())
        .bind(result)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Mark a job as `FAILURE` with the error detail.
    pub async fn fail(pool: &PgPool, id: &str, error_message: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE jobs SET state = $2, error_message = $3, completed_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(JobState::Failure.as_str())
        .bind(error_message)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch a job by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every known job, newest first.
    ///
    /// O(n) over the job namespace; there is no pagination or expiry at this
    /// layer, matching the status-store contract.
    pub async fn list(pool: &PgPool) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs ORDER BY created_at DESC, id");
        sqlx::query_as::<_, Job>(&query).fetch_all(pool).await
    }
}
