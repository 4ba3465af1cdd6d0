//! Broker connection establishment.

use std::time::Duration;

use lapin::{Connection, ConnectionProperties};

use crate::error::BrokerError;

/// How many times to attempt the initial connection.
const CONNECT_ATTEMPTS: u32 = 5;

/// Fixed delay between connection attempts. No exponential backoff: a
/// broker that stays down aborts process startup.
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Connect to the broker, retrying a bounded number of times.
///
/// Returns the live connection on the first successful attempt, or
/// [`BrokerError::ConnectFailed`] once all attempts are exhausted.
pub async fn connect(url: &str) -> Result<Connection, BrokerError> {
    for attempt in 1..=CONNECT_ATTEMPTS {
        match Connection::connect(url, ConnectionProperties::default()).await {
            Ok(connection) => {
                tracing::info!(attempt, "Connected to message broker");
                return Ok(connection);
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = CONNECT_ATTEMPTS,
                    error = %e,
                    "Broker connection attempt failed"
                );
                if attempt < CONNECT_ATTEMPTS {
                    tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                }
            }
        }
    }

    Err(BrokerError::ConnectFailed {
        attempts: CONNECT_ATTEMPTS,
    })
}
