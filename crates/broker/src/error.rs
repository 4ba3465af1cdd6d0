/// Error type for broker operations.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    /// All connection attempts were exhausted.
    #[error("Connection to the message broker failed after {attempts} attempts")]
    ConnectFailed { attempts: u32 },

    /// An AMQP-level failure (declare, bind, publish, consume).
    #[error("Broker protocol error: {0}")]
    Protocol(#[from] lapin::Error),

    /// The message body could not be serialized.
    #[error("Failed to serialize message body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No channel could be produced for the requested operation.
    #[error("Broker channel unavailable: {0}")]
    ChannelUnavailable(String),
}
