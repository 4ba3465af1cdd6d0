//! HTTP-level integration tests for the workflow endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use sqlx::PgPool;

/// Creating a workflow answers 200 with a generated 36-character id, even
/// though the broker is unavailable: the creation broadcast is best-effort
/// and must not undo a committed create.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_workflow_returns_persisted_definition(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "tenant_id": "t1",
        "workflow": [
            {"action": "http_request", "params": {"url": "https://example.com"}}
        ]
    });
    let response = post_json(app, "/workflow-create", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"].as_str().expect("id is a string").len(), 36);
    assert_eq!(json["tenant_id"], "t1");
    assert_eq!(json["workflow"][0]["action"], "http_request");
    assert_eq!(json["workflow"][0]["params"]["url"], "https://example.com");
}

/// Round-trip: the listed definition carries the same step sequence, in the
/// same order, as the create payload.
#[sqlx::test(migrations = "../db/migrations")]
async fn created_workflow_round_trips_through_list(pool: PgPool) {
    let steps = serde_json::json!([
        {"action": "http_request", "params": {"url": "https://example.com"}},
        {"action": "summarize_text", "params": {"text": "hello"}},
        {"action": "save_to_database"}
    ]);

    let response = post_json(
        build_test_app(pool.clone()),
        "/workflow-create",
        serde_json::json!({"tenant_id": "t1", "workflow": steps}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;

    let response = get(build_test_app(pool), "/workflow-list").await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;

    assert_eq!(listed.as_array().expect("list is an array").len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["workflow"], steps);
}

/// An action outside the closed registry is rejected with 422 and the
/// structured error envelope, and nothing is persisted.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_action_is_rejected_before_persistence(pool: PgPool) {
    let body = serde_json::json!({
        "tenant_id": "t1",
        "workflow": [{"action": "delete_everything", "params": {}}]
    });
    let response = post_json(build_test_app(pool.clone()), "/workflow-create", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed");
    assert!(json["error"].is_string());
    assert_eq!(json["color"], "warning");

    let response = get(build_test_app(pool), "/workflow-list").await;
    let listed = body_json(response).await;
    assert!(
        listed.as_array().expect("list is an array").is_empty(),
        "no partial record may be created"
    );
}

/// An empty tenant_id fails DTO validation with 422.
#[sqlx::test(migrations = "../db/migrations")]
async fn empty_tenant_id_is_rejected(pool: PgPool) {
    let body = serde_json::json!({"tenant_id": "", "workflow": []});
    let response = post_json(build_test_app(pool), "/workflow-create", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["color"], "warning");
}

/// An empty step list is an accepted edge case, not a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn empty_step_list_is_accepted(pool: PgPool) {
    let body = serde_json::json!({"tenant_id": "t1", "workflow": []});
    let response = post_json(build_test_app(pool), "/workflow-create", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["workflow"], serde_json::json!([]));
}

/// An oversized limit is clamped rather than rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_accepts_oversized_limit(pool: PgPool) {
    for _ in 0..3 {
        let response = post_json(
            build_test_app(pool.clone()),
            "/workflow-create",
            serde_json::json!({"tenant_id": "t1", "workflow": []}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(build_test_app(pool), "/workflow-list?skip=0&limit=5000").await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().expect("list is an array").len(), 3);
}

/// The result listing starts empty and answers 200.
#[sqlx::test(migrations = "../db/migrations")]
async fn workflow_result_list_starts_empty(pool: PgPool) {
    let response = get(build_test_app(pool), "/workflow-result-list").await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert!(listed.as_array().expect("list is an array").is_empty());
}
