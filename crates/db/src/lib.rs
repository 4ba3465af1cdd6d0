//! Postgres persistence layer for Flowline.
//!
//! Exposes the connection pool helpers used by both binaries, the scoped
//! transaction helper, and the model/repository modules:
//!
//! - [`models`] -- `FromRow` entity structs and request DTOs.
//! - [`repositories`] -- zero-sized structs with async CRUD methods.

use futures::future::BoxFuture;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Postgres, Transaction};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial round trip.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
///
/// The connection is released on every exit path; if the closure errors,
/// the explicit rollback (or the transaction's drop guard, should rollback
/// itself fail) discards any partial writes before the error is returned.
///
/// ```ignore
/// let job = with_transaction(&pool, |tx| {
///     Box::pin(async move { JobRepo::insert(&mut **tx, &id, &workflow_id).await })
/// })
/// .await?;
/// ```
pub async fn with_transaction<T, F>(pool: &DbPool, f: F) -> Result<T, sqlx::Error>
where
    F: for<'t> FnOnce(
        &'t mut Transaction<'static, Postgres>,
    ) -> BoxFuture<'t, Result<T, sqlx::Error>>,
{
    let mut tx = pool.begin().await?;
    match f(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
