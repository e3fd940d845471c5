use async_trait::async_trait;
use tincan_core::SignalMessage;

/// Outbound half of the signaling channel, implemented by whatever
/// transport carries messages to the other room member (WebSocket server,
/// in-memory router in tests). Each session owns its handle; there is no
/// process-wide channel.
///
/// Delivery to the peer is reliable and ordered per sender; the trait
/// itself is fire-and-forget, so a transport that loses its connection
/// logs and drops rather than erroring into the state machine.
#[async_trait]
pub trait SignalChannel: Send + Sync {
    async fn send(&self, msg: SignalMessage);
}
