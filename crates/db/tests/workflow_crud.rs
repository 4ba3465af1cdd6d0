//! Integration tests for the workflow and workflow_result repositories.

use flowline_core::types::new_record_id;
use flowline_core::workflow::{StepAction, WorkflowStep};
use flowline_db::repositories::{WorkflowRepo, WorkflowResultRepo};
use flowline_db::with_transaction;
use sqlx::PgPool;

/// Build a three-step definition covering every action.
fn sample_steps() -> Vec<WorkflowStep> {
    vec![
        WorkflowStep {
            action: StepAction::HttpRequest,
            params: Some(serde_json::json!({"url": "https://example.com"})),
        },
        WorkflowStep {
            action: StepAction::SummarizeText,
            params: Some(serde_json::json!({"text": "summarize this"})),
        },
        WorkflowStep {
            action: StepAction::SaveToDatabase,
            params: None,
        },
    ]
}

/// Inserting a definition and reading it back preserves the step sequence
/// exactly: same order, same actions, same params.
#[sqlx::test]
async fn insert_then_find_round_trips_steps(pool: PgPool) {
    let id = new_record_id();
    let steps = sample_steps();

    let inserted = WorkflowRepo::insert(&pool, &id, "t1", &steps)
        .await
        .expect("insert should succeed");
    assert_eq!(inserted.id, id);
    assert_eq!(inserted.tenant_id, "t1");

    let found = WorkflowRepo::find_by_id(&pool, &id)
        .await
        .expect("find should succeed")
        .expect("definition should exist");
    assert_eq!(found.workflow.0, steps);
}

/// An empty step list is accepted and round-trips as empty.
#[sqlx::test]
async fn empty_step_list_is_accepted(pool: PgPool) {
    let id = new_record_id();
    let inserted = WorkflowRepo::insert(&pool, &id, "t1", &[])
        .await
        .expect("insert should succeed");
    assert!(inserted.workflow.0.is_empty());
}

/// Listing respects skip/limit and returns rows in creation order.
#[sqlx::test]
async fn list_respects_skip_and_limit(pool: PgPool) {
    for _ in 0..5 {
        WorkflowRepo::insert(&pool, &new_record_id(), "t1", &sample_steps())
            .await
            .expect("insert should succeed");
    }

    let all = WorkflowRepo::list(&pool, 0, 200).await.expect("list");
    assert_eq!(all.len(), 5);

    let page = WorkflowRepo::list(&pool, 2, 2).await.expect("list");
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, all[2].id);
    assert_eq!(page[1].id, all[3].id);
}

/// Result rows store the per-step records in order and list back out.
#[sqlx::test]
async fn result_insert_and_list(pool: PgPool) {
    let workflow_id = new_record_id();
    let records = vec![
        serde_json::json!({"action": "http_request", "output": {"status": "ok"}}),
        serde_json::json!({"action": "save_to_database", "output": {"saved": true}}),
    ];

    let inserted = WorkflowResultRepo::insert(&pool, &new_record_id(), &workflow_id, &records)
        .await
        .expect("insert should succeed");
    assert_eq!(inserted.workflow_id, workflow_id);
    assert_eq!(inserted.workflow_result.0, records);

    let listed = WorkflowResultRepo::list(&pool).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].workflow_result.0, records);
}

/// A failed transaction leaves no partial rows behind.
#[sqlx::test]
async fn transaction_rolls_back_on_error(pool: PgPool) {
    let id = new_record_id();
    let steps = sample_steps();

    let outcome: Result<(), sqlx::Error> = with_transaction(&pool, |tx| {
        let id = id.clone();
        let steps = steps.clone();
        Box::pin(async move {
            WorkflowRepo::insert(&mut **tx, &id, "t1", &steps).await?;
            // Duplicate primary key forces the transaction to fail.
            WorkflowRepo::insert(&mut **tx, &id, "t1", &steps).await?;
            Ok(())
        })
    })
    .await;
    assert!(outcome.is_err());

    let found = WorkflowRepo::find_by_id(&pool, &id).await.expect("find");
    assert!(found.is_none(), "rollback must discard the first insert");
}
