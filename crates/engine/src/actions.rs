//! Action handlers for the step registry.
//!
//! Each handler takes the step's opaque `params` payload and returns one
//! JSON output record. Handler failures abort the surrounding execution.

use flowline_core::types::new_record_id;
use flowline_db::repositories::WorkflowResultRepo;
use flowline_db::DbPool;
use serde_json::Value;

use crate::error::StepError;

/// Whether a `Content-Type` header value indicates a JSON body.
fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("application/json")
}

/// Perform a GET against `params.url`.
///
/// The shared client is built with a bounded timeout and follows redirects.
/// Returns parsed JSON when the response declares a JSON content type (or
/// the raw text when that parse fails), otherwise the raw text body.
/// Non-2xx responses are a handler failure.
pub async fn http_request(
    client: &reqwest::Client,
    params: Option<&Value>,
) -> Result<Value, StepError> {
    let url = params
        .and_then(|p| p.get("url"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| {
            StepError::InvalidParams("http_request requires a string `url` param".into())
        })?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(StepError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.text().await?;

    if is_json_content_type(&content_type) {
        match serde_json::from_str(&body) {
            Ok(json) => Ok(json),
            Err(_) => Ok(Value::String(body)),
        }
    } else {
        Ok(Value::String(body))
    }
}

/// Persist the step params as a workflow result record.
///
/// Inserts a `workflow_result` row holding `params` (as a single-element
/// list) for the running workflow and reports the new row's id.
pub async fn save_to_database(
    pool: &DbPool,
    workflow_id: &str,
    params: Option<&Value>,
) -> Result<Value, StepError> {
    let record = params.cloned().unwrap_or(Value::Null);
    let id = new_record_id();

    WorkflowResultRepo::insert(pool, &id, workflow_id, &[record]).await?;

    Ok(serde_json::json!({"saved": true, "result_id": id}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/html; charset=utf-8"));
        assert!(!is_json_content_type(""));
    }

    #[tokio::test]
    async fn http_request_rejects_missing_url() {
        let client = reqwest::Client::new();
        let err = http_request(&client, Some(&serde_json::json!({"href": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StepError::InvalidParams(_)));

        let err = http_request(&client, None).await.unwrap_err();
        assert!(matches!(err, StepError::InvalidParams(_)));
    }
}
