//! Shared helpers for HTTP-level integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use flowline_api::config::ApiConfig;
use flowline_api::router::app_router;
use flowline_api::state::AppState;
use flowline_broker::{BrokerError, Channel, ChannelProvider, Publisher};

/// Channel provider that never yields a channel.
///
/// Tests run without a live broker, so every publish fails; what the tests
/// then observe is each handler's declared failure policy (best-effort
/// broadcasts versus hard enqueue dependencies).
struct UnavailableChannelProvider;

#[async_trait]
impl ChannelProvider for UnavailableChannelProvider {
    async fn get_channel(&self) -> Result<Channel, BrokerError> {
        Err(BrokerError::ChannelUnavailable(
            "no broker in tests".to_string(),
        ))
    }
}

/// Build a test `ApiConfig` with safe defaults and placeholder URLs.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://unused-in-tests".to_string(),
        broker_url: "amqp://unused-in-tests".to_string(),
    }
}

/// Build the application router against the given pool, with a publisher
/// whose channel provider always fails.
pub fn build_test_app(pool: PgPool) -> Router {
    let publisher = Arc::new(Publisher::new(Arc::new(UnavailableChannelProvider)));
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        publisher,
    };
    app_router().with_state(state)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Collect a response body and decode it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
