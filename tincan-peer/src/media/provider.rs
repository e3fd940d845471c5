use crate::error::CaptureError;
use async_trait::async_trait;

/// Local capture source (camera + microphone, screen share, a file in
/// tests). Acquisition suspends until the device is granted or denied;
/// whoever acquired the tracks is responsible for stopping them.
#[async_trait]
pub trait MediaProvider: Send + Sync + 'static {
    type Track: Clone + Send + Sync + 'static;

    async fn request_local_tracks(&self) -> Result<Vec<Self::Track>, CaptureError>;

    /// Stop an acquired track and release the underlying device.
    async fn stop_track(&self, track: &Self::Track);
}
