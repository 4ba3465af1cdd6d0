//! Event broadcast helpers.
//!
//! Broadcasts go out on fanout exchanges wrapped in the `{"data": ...}`
//! wire envelope. Delivery is at-most-once to each currently-bound queue;
//! with no listener bound the broker drops the message. That loss is the
//! documented guarantee of the notification path, not an error.

use flowline_broker::{BrokerError, PublishBody, Publisher};
use flowline_core::events::EventEnvelope;

/// Broadcast `payload` on `exchange`, wrapped in the event envelope.
pub async fn broadcast_event(
    publisher: &Publisher,
    exchange: &str,
    payload: serde_json::Value,
) -> Result<(), BrokerError> {
    let envelope = EventEnvelope::new(payload);
    let body = serde_json::to_value(&envelope)?;
    publisher.publish(exchange, PublishBody::Json(body)).await
}

/// Best-effort broadcast: a failure is logged and swallowed, so it can
/// never fail the operation whose outcome it merely announces.
pub async fn broadcast_event_best_effort(
    publisher: &Publisher,
    exchange: &str,
    payload: serde_json::Value,
) {
    if let Err(e) = broadcast_event(publisher, exchange, payload).await {
        tracing::error!(exchange, error = %e, "Event broadcast failed, continuing");
    }
}
