//! Async transport abstraction over the synchronous Pushbullet client.
//!
//! The dispatcher is written against the [`SmsTransport`] trait, not a wire
//! format, so the concrete protocol variant (or a test double) is swappable.
//! [`AsyncPushbulletTransport`] adapts the blocking client by running each
//! call on `tokio::task::spawn_blocking`, keeping the async runtime free
//! while sends are in flight.

use crate::client::PushbulletClient;
use crate::domain::{MessageId, PhoneNumber};
use crate::error::{TransportError, TransportResult};
use async_trait::async_trait;
use std::sync::Arc;

/// The single capability the dispatcher needs from an outbound messaging
/// transport.
///
/// Implementations must be safe to share across concurrent sends: the
/// dispatcher issues every group's request against one shared handle.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Deliver `body` to all of `numbers` as a single group message and
    /// return the vendor's identifier for it.
    async fn send_group_message(
        &self,
        numbers: &[PhoneNumber],
        body: &str,
    ) -> TransportResult<MessageId>;
}

/// Async wrapper around the synchronous [`PushbulletClient`].
#[derive(Clone)]
pub struct AsyncPushbulletTransport {
    client: Arc<PushbulletClient>,
}

impl AsyncPushbulletTransport {
    pub fn new(client: PushbulletClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl SmsTransport for AsyncPushbulletTransport {
    async fn send_group_message(
        &self,
        numbers: &[PhoneNumber],
        body: &str,
    ) -> TransportResult<MessageId> {
        let client = self.client.clone();
        let numbers = numbers.to_vec();
        let body = body.to_string();

        tokio::task::spawn_blocking(move || client.send_sms(&numbers, &body))
            .await
            .map_err(|e| TransportError::HttpError(format!("Task join error: {}", e)))?
    }
}
