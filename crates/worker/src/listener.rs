//! Workflow-creation event listener.

use std::sync::Arc;

use flowline_broker::{BrokerError, ChannelProvider, Consumer, ConsumerConfig};
use flowline_core::events::{EventEnvelope, CREATE_WORKFLOW_EXCHANGE};

/// Logs every workflow-creation event broadcast on the fanout exchange.
///
/// The subscription is ephemeral: an anonymous, exclusive, auto-delete
/// queue that disappears with this process's connection. Events published
/// while no listener is bound are dropped by the broker; that loss is the
/// documented delivery guarantee of the notification path.
pub struct CreateWorkflowListener;

impl CreateWorkflowListener {
    /// Bind an anonymous queue to `create_workflow` and start logging.
    pub async fn start(provider: Arc<dyn ChannelProvider>) -> Result<String, BrokerError> {
        let consumer = Consumer::new(provider, ConsumerConfig::fanout(CREATE_WORKFLOW_EXCHANGE));
        consumer
            .start(|payload| async move {
                let envelope: EventEnvelope = serde_json::from_slice(&payload)?;
                tracing::info!(event = %envelope.data, "Workflow created");
                Ok(())
            })
            .await
    }
}
