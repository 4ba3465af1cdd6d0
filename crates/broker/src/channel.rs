//! Channel acquisition capability.
//!
//! Both broker roles acquire channels through the one-method
//! [`ChannelProvider`] trait rather than owning a connection, so the
//! connection lifecycle stays out of publisher/consumer code and tests can
//! inject a pre-built (or failing) provider.

use async_trait::async_trait;
use lapin::{Channel, Connection};
use tokio::sync::Mutex;

use crate::error::BrokerError;

/// Capability yielding a live broker channel.
///
/// `get_channel` is idempotent: repeated calls return a usable channel,
/// transparently replacing one that has been closed in the meantime.
#[async_trait]
pub trait ChannelProvider: Send + Sync {
    async fn get_channel(&self) -> Result<Channel, BrokerError>;
}

/// Channel provider backed by a connection.
///
/// Lazily opens a channel on first use and caches it; a cached channel that
/// is no longer connected is dropped and replaced on the next call.
pub struct ConnectionChannelProvider {
    connection: Connection,
    channel: Mutex<Option<Channel>>,
}

impl ConnectionChannelProvider {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            channel: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ChannelProvider for ConnectionChannelProvider {
    async fn get_channel(&self) -> Result<Channel, BrokerError> {
        let mut cached = self.channel.lock().await;

        if let Some(channel) = cached.as_ref() {
            if channel.status().connected() {
                return Ok(channel.clone());
            }
            tracing::debug!("Cached broker channel closed, opening a replacement");
        }

        let channel = self.connection.create_channel().await?;
        *cached = Some(channel.clone());
        Ok(channel)
    }
}

/// Channel provider that returns a pre-supplied channel.
///
/// Used for dependency injection and adapters that already hold a channel.
pub struct StaticChannelProvider {
    channel: Channel,
}

impl StaticChannelProvider {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ChannelProvider for StaticChannelProvider {
    async fn get_channel(&self) -> Result<Channel, BrokerError> {
        Ok(self.channel.clone())
    }
}
