//! Message publishing with exchange auto-declare.

use std::sync::Arc;

use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, ExchangeKind};

use crate::channel::ChannelProvider;
use crate::error::BrokerError;

/// Content type applied to every text body, regardless of what the caller
/// requested.
const TEXT_CONTENT_TYPE: &str = "text/plain";

/// A message body and its encoding policy.
#[derive(Debug, Clone)]
pub enum PublishBody {
    /// Raw bytes pass through unchanged with the caller's content type.
    Bytes(Vec<u8>),
    /// Text is UTF-8 encoded; the content type is forced to `text/plain`.
    Text(String),
    /// A JSON value, serialized and tagged with the caller's content type.
    Json(serde_json::Value),
}

/// Options for a single publish call.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub exchange_type: ExchangeKind,
    pub routing_key: String,
    pub durable: bool,
    pub content_type: String,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            exchange_type: ExchangeKind::Fanout,
            routing_key: String::new(),
            durable: true,
            content_type: "application/json".to_string(),
        }
    }
}

/// Encode a body per the publish policy.
///
/// Returns the wire bytes and the effective content type.
fn encode_body(
    body: &PublishBody,
    requested_content_type: &str,
) -> Result<(Vec<u8>, String), serde_json::Error> {
    match body {
        PublishBody::Bytes(bytes) => Ok((bytes.clone(), requested_content_type.to_string())),
        PublishBody::Text(text) => {
            Ok((text.as_bytes().to_vec(), TEXT_CONTENT_TYPE.to_string()))
        }
        PublishBody::Json(value) => {
            Ok((serde_json::to_vec(value)?, requested_content_type.to_string()))
        }
    }
}

/// Simple publisher with idempotent exchange declare.
///
/// Each call hands exactly one fully-encoded message to the broker; there is
/// no batching and no retry at this layer. Declare or publish failures
/// propagate to the caller unchanged. A redeclare with mismatched parameters
/// is the broker's error to raise, not handled specially here.
///
/// ```ignore
/// let connection = connect(&broker_url).await?;
/// let publisher = Publisher::new(Arc::new(ConnectionChannelProvider::new(connection)));
/// publisher.publish("create_workflow", PublishBody::Json(payload)).await?;
/// ```
pub struct Publisher {
    provider: Arc<dyn ChannelProvider>,
}

impl Publisher {
    pub fn new(provider: Arc<dyn ChannelProvider>) -> Self {
        Self { provider }
    }

    /// Publish with default options (durable fanout, empty routing key,
    /// `application/json`).
    pub async fn publish(&self, exchange_name: &str, body: PublishBody) -> Result<(), BrokerError> {
        self.publish_with(exchange_name, body, PublishOptions::default())
            .await
    }

    /// Publish with explicit options.
    pub async fn publish_with(
        &self,
        exchange_name: &str,
        body: PublishBody,
        options: PublishOptions,
    ) -> Result<(), BrokerError> {
        let channel = self.provider.get_channel().await?;

        channel
            .exchange_declare(
                exchange_name,
                options.exchange_type.clone(),
                ExchangeDeclareOptions {
                    durable: options.durable,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        // The body is fully encoded before the broker hand-off; there is no
        // partially-framed message to race against.
        let (payload, content_type) = encode_body(&body, &options.content_type)?;

        channel
            .basic_publish(
                exchange_name,
                &options.routing_key,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_content_type(content_type.into()),
            )
            .await?
            .await?;

        tracing::debug!(
            exchange = exchange_name,
            bytes = payload.len(),
            "Message published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pass_through_with_caller_content_type() {
        let body = PublishBody::Bytes(vec![0x01, 0x02, 0xff]);
        let (payload, content_type) = encode_body(&body, "application/octet-stream").unwrap();
        assert_eq!(payload, vec![0x01, 0x02, 0xff]);
        assert_eq!(content_type, "application/octet-stream");
    }

    #[test]
    fn text_forces_text_plain_content_type() {
        let body = PublishBody::Text("hello".into());
        // The caller asked for JSON; text bodies override that.
        let (payload, content_type) = encode_body(&body, "application/json").unwrap();
        assert_eq!(payload, b"hello".to_vec());
        assert_eq!(content_type, "text/plain");
    }

    #[test]
    fn json_serializes_with_caller_content_type() {
        let body = PublishBody::Json(serde_json::json!({"data": {"id": "abc"}}));
        let (payload, content_type) = encode_body(&body, "application/json").unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(decoded["data"]["id"], "abc");
        assert_eq!(content_type, "application/json");
    }

    #[test]
    fn default_options_are_durable_fanout_json() {
        let options = PublishOptions::default();
        assert!(matches!(options.exchange_type, ExchangeKind::Fanout));
        assert_eq!(options.routing_key, "");
        assert!(options.durable);
        assert_eq!(options.content_type, "application/json");
    }
}
