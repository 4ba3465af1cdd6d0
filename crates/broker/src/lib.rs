//! AMQP broker plumbing for Flowline.
//!
//! A thin declare/bind/consume layer over [`lapin`], shared by the API
//! (publisher role) and the worker (consumer role):
//!
//! - [`connect`] -- bounded-retry connection establishment.
//! - [`ChannelProvider`] -- one-method capability yielding a live channel,
//!   with a connection-backed and a pre-supplied variant.
//! - [`Publisher`] -- idempotent exchange declare + publish with the
//!   bytes/text/JSON body policy.
//! - [`Consumer`] -- declares and binds a queue (named durable or anonymous
//!   exclusive) and invokes a callback per delivery inside an ack scope.
//!
//! Channels are owned by one connection; the providers cache one channel and
//! rely on the client's internal framing to serialize concurrent use. Give
//! each logical publisher/consumer role its own provider if that assumption
//! does not hold.

pub mod channel;
pub mod connection;
pub mod consumer;
pub mod error;
pub mod publisher;

pub use channel::{ChannelProvider, ConnectionChannelProvider, StaticChannelProvider};
pub use connection::connect;
pub use consumer::{ensure_bound_queue, Consumer, ConsumerConfig};
pub use error::BrokerError;
pub use publisher::{PublishBody, PublishOptions, Publisher};

// Re-exported so downstream crates can name exchange kinds and channels
// without depending on lapin directly.
pub use lapin::{Channel, Connection, ExchangeKind};
