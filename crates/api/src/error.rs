//! Application-level error type and the structured error envelope.
//!
//! Every failing endpoint answers with `{message, error, color}`:
//! `message` is a short human-readable summary, `error` a short machine
//! string, and `color` a frontend hint (`"warning"` for 4xx, `"error"` for
//! 5xx). Dependency failures are logged with full detail server-side; the
//! envelope never carries internal detail beyond a short string.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flowline_broker::BrokerError;
use flowline_core::CoreError;
use serde::Serialize;

/// Structured error payload returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
    pub color: String,
}

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `flowline-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A broker error from the publish path.
    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),

    /// The request body failed to deserialize into the typed DTO. This is
    /// where an unknown step action surfaces: the closed enum rejects it
    /// before any persistence happens.
    #[error("Invalid request body: {0}")]
    JsonRejection(#[from] JsonRejection),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Frontend color hint for a status class.
fn color_for(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else {
        "warning"
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} not found"),
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Validation failed".to_string(),
                    msg.clone(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                        "internal error".to_string(),
                    )
                }
            },

            AppError::Database(err) => match err {
                sqlx::Error::RowNotFound => (
                    StatusCode::NOT_FOUND,
                    "Resource not found".to_string(),
                    "not found".to_string(),
                ),
                other => {
                    tracing::error!(error = %other, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database operation failed".to_string(),
                        "database error".to_string(),
                    )
                }
            },

            AppError::Broker(err) => {
                tracing::error!(error = %err, "Broker error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Message broker operation failed".to_string(),
                    "broker error".to_string(),
                )
            }

            AppError::JsonRejection(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                rejection.body_text(),
            ),

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "internal error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            message,
            error,
            color: color_for(status).to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// JSON extractor that routes its rejection through [`AppError`], so a
/// malformed body answers with the structured envelope instead of axum's
/// default plain-text rejection.
#[derive(axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);
