//! Declarative queue consumption.

use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicQosOptions,
    ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::ExchangeKind;

use crate::channel::ChannelProvider;
use crate::error::BrokerError;

/// Boxed error type accepted from consumer callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for a [`Consumer`].
///
/// Leaving `queue_name` unset declares an anonymous, exclusive, auto-delete
/// queue: an ephemeral fanout subscription that disappears with its
/// connection. Setting a name declares a durable named queue suitable for
/// work distribution across competing consumers. The same declare/bind path
/// serves both topologies.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub exchange_name: String,
    pub queue_name: Option<String>,
    pub exchange_type: ExchangeKind,
    pub routing_key: String,
    pub durable: bool,
    pub exclusive: Option<bool>,
    pub auto_delete: Option<bool>,
    pub prefetch_count: Option<u16>,
}

impl ConsumerConfig {
    /// Fanout subscription defaults: durable exchange, anonymous queue,
    /// empty routing key (fanout ignores it), no prefetch cap.
    pub fn fanout(exchange_name: impl Into<String>) -> Self {
        Self {
            exchange_name: exchange_name.into(),
            queue_name: None,
            exchange_type: ExchangeKind::Fanout,
            routing_key: String::new(),
            durable: true,
            exclusive: None,
            auto_delete: None,
            prefetch_count: None,
        }
    }

    /// Consume from a named durable queue instead of an anonymous one.
    pub fn with_queue(mut self, queue_name: impl Into<String>) -> Self {
        self.queue_name = Some(queue_name.into());
        self
    }

    /// Cap the number of unacknowledged deliveries held at once.
    pub fn with_prefetch(mut self, prefetch_count: u16) -> Self {
        self.prefetch_count = Some(prefetch_count);
        self
    }
}

/// Queue declaration parameters resolved from a [`ConsumerConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueuePlan {
    name: String,
    durable: bool,
    exclusive: bool,
    auto_delete: bool,
}

impl QueuePlan {
    /// Apply the queue rules: no name means exclusive + auto-delete (and
    /// never durable); a named queue takes the configured durability unless
    /// an exclusive override forces it off.
    fn resolve(config: &ConsumerConfig) -> Self {
        match &config.queue_name {
            None => Self {
                name: String::new(),
                durable: false,
                exclusive: true,
                auto_delete: true,
            },
            Some(name) => {
                let exclusive = config.exclusive.unwrap_or(false);
                Self {
                    name: name.clone(),
                    durable: if exclusive { false } else { config.durable },
                    exclusive,
                    auto_delete: config.auto_delete.unwrap_or(false),
                }
            }
        }
    }
}

/// Declare a durable queue bound to a durable fanout exchange without
/// consuming from it.
///
/// Publishers call this at startup for work-queue topologies: a fanout
/// exchange drops messages that arrive while no queue is bound, so the
/// queue must exist before the first publish even if no consumer has
/// started yet. Idempotent against identical redeclares.
pub async fn ensure_bound_queue(
    provider: &dyn ChannelProvider,
    exchange_name: &str,
    queue_name: &str,
) -> Result<(), BrokerError> {
    let channel = provider.get_channel().await?;

    channel
        .exchange_declare(
            exchange_name,
            ExchangeKind::Fanout,
            ExchangeDeclareOptions {
                durable: true,
                ..Default::default()
            },
            FieldTable::default(),
        )
        .await?;

    channel
        .queue_declare(
            queue_name,
            QueueDeclareOptions {
                durable: true,
                ..Default::default()
            },
            FieldTable::default(),
        )
        .await?;

    channel
        .queue_bind(
            queue_name,
            exchange_name,
            "",
            QueueBindOptions::default(),
            FieldTable::default(),
        )
        .await?;

    tracing::info!(exchange = exchange_name, queue = queue_name, "Work queue bound");
    Ok(())
}

/// Declarative consumer: declares the exchange, declares and binds a queue,
/// then invokes a callback per delivered message.
///
/// The callback runs inside an acknowledgement scope: the message is acked
/// when the callback returns `Ok`, and nacked without requeue when it
/// returns `Err`. Declaring the same exchange/queue twice with identical
/// parameters is idempotent on the broker side, so `start` can be called by
/// any number of identically-configured processes.
pub struct Consumer {
    provider: Arc<dyn ChannelProvider>,
    config: ConsumerConfig,
}

impl Consumer {
    pub fn new(provider: Arc<dyn ChannelProvider>, config: ConsumerConfig) -> Self {
        Self { provider, config }
    }

    /// Set up the topology and begin consuming on a background task.
    ///
    /// Returns the broker-assigned consumer tag. Deliveries are processed
    /// sequentially per consumer; the prefetch setting bounds how many
    /// unacknowledged messages the channel holds.
    pub async fn start<F, Fut>(&self, callback: F) -> Result<String, BrokerError>
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send,
    {
        let channel = self.provider.get_channel().await?;

        if let Some(prefetch) = self.config.prefetch_count {
            channel
                .basic_qos(prefetch, BasicQosOptions::default())
                .await?;
        }

        channel
            .exchange_declare(
                &self.config.exchange_name,
                self.config.exchange_type.clone(),
                ExchangeDeclareOptions {
                    durable: self.config.durable,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        let plan = QueuePlan::resolve(&self.config);
        let queue = channel
            .queue_declare(
                &plan.name,
                QueueDeclareOptions {
                    durable: plan.durable,
                    exclusive: plan.exclusive,
                    auto_delete: plan.auto_delete,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;
        let queue_name = queue.name().as_str().to_string();

        channel
            .queue_bind(
                &queue_name,
                &self.config.exchange_name,
                &self.config.routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;

        let mut consumer = channel
            .basic_consume(
                &queue_name,
                "",
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;
        let consumer_tag = consumer.tag().to_string();

        let exchange_name = self.config.exchange_name.clone();
        tracing::info!(
            exchange = %exchange_name,
            queue = %queue_name,
            consumer_tag = %consumer_tag,
            "Consumer started"
        );

        tokio::spawn(async move {
            while let Some(delivery) = consumer.next().await {
                let mut delivery = match delivery {
                    Ok(delivery) => delivery,
                    Err(e) => {
                        tracing::error!(exchange = %exchange_name, error = %e, "Consumer stream error");
                        continue;
                    }
                };

                let payload = std::mem::take(&mut delivery.data);
                match callback(payload).await {
                    Ok(()) => {
                        if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
                            tracing::error!(exchange = %exchange_name, error = %e, "Failed to ack delivery");
                        }
                    }
                    Err(e) => {
                        tracing::error!(
                            exchange = %exchange_name,
                            error = %e,
                            "Consumer callback failed, rejecting delivery"
                        );
                        let nack = BasicNackOptions {
                            requeue: false,
                            ..Default::default()
                        };
                        if let Err(e) = delivery.nack(nack).await {
                            tracing::error!(exchange = %exchange_name, error = %e, "Failed to nack delivery");
                        }
                    }
                }
            }
            tracing::info!(exchange = %exchange_name, "Consumer stream closed");
        });

        Ok(consumer_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_queue_name_forces_ephemeral_queue() {
        let config = ConsumerConfig::fanout("create_workflow");
        let plan = QueuePlan::resolve(&config);
        assert_eq!(
            plan,
            QueuePlan {
                name: String::new(),
                durable: false,
                exclusive: true,
                auto_delete: true,
            }
        );
    }

    #[test]
    fn named_queue_keeps_configured_durability() {
        let config = ConsumerConfig::fanout("execute_workflow").with_queue("execute_workflow");
        let plan = QueuePlan::resolve(&config);
        assert_eq!(
            plan,
            QueuePlan {
                name: "execute_workflow".to_string(),
                durable: true,
                exclusive: false,
                auto_delete: false,
            }
        );
    }

    #[test]
    fn exclusive_override_disables_durability() {
        let mut config = ConsumerConfig::fanout("events").with_queue("events");
        config.exclusive = Some(true);
        let plan = QueuePlan::resolve(&config);
        assert!(plan.exclusive);
        assert!(!plan.durable);
    }

    #[test]
    fn auto_delete_override_applies_to_named_queues() {
        let mut config = ConsumerConfig::fanout("events").with_queue("events");
        config.auto_delete = Some(true);
        let plan = QueuePlan::resolve(&config);
        assert!(plan.auto_delete);
        assert!(plan.durable);
    }

    #[test]
    fn prefetch_builder_sets_count() {
        let config = ConsumerConfig::fanout("execute_workflow")
            .with_queue("execute_workflow")
            .with_prefetch(1);
        assert_eq!(config.prefetch_count, Some(1));
    }
}
