//! Concurrent fan-out of one send per resolved group.

use crate::client::SmsTransport;
use crate::domain::MessageId;
use crate::error::TransportError;
use crate::roster::ResolvedGroup;
use futures::future;
use std::sync::Arc;

/// Per-group outcome: the vendor's identifier for the sent message, or the
/// captured failure for that group alone.
pub type DispatchResult = Result<MessageId, TransportError>;

/// Fans one send per group out over a shared transport and joins on all of
/// them before returning.
///
/// There is no inter-request coordination and no shared mutable state: each
/// group's future builds its own request against an `Arc` clone of the
/// transport handle, which is released on every exit path when the futures
/// drop.
pub struct Dispatcher {
    transport: Arc<dyn SmsTransport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn SmsTransport>) -> Self {
        Self { transport }
    }

    /// Send `message` to every group concurrently.
    ///
    /// The returned vector is index-aligned with `groups`: exactly one entry
    /// per group, in input order, whatever the completion order was. A
    /// failed send is captured as that entry's error and neither cancels nor
    /// delays the sibling requests; there is no retry.
    pub async fn dispatch(&self, message: &str, groups: &[ResolvedGroup]) -> Vec<DispatchResult> {
        let sends = groups.iter().map(|group| {
            let transport = Arc::clone(&self.transport);
            async move {
                let result = transport.send_group_message(group.numbers(), message).await;
                match &result {
                    Ok(id) => {
                        tracing::debug!(group = group.name(), iden = %id, "send succeeded")
                    }
                    Err(error) => tracing::error!(group = group.name(), %error, "send failed"),
                }
                result
            }
        });

        future::join_all(sends).await
    }
}
