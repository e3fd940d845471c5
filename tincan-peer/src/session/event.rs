use crate::error::CaptureError;
use tincan_core::IceCandidateInit;
use tokio::sync::mpsc;

/// Events produced by the connection backend and the media acquisition
/// task, merged into the session loop alongside inbound signals.
pub enum SessionEvent<T> {
    /// A locally discovered reachability candidate to relay outward.
    LocalCandidate(IceCandidateInit),

    /// Capture completed; tracks are ready to attach.
    MediaReady(Vec<T>),

    /// Capture was denied or the device is unavailable.
    MediaFailed(CaptureError),

    /// The underlying connection dropped; the session tears down.
    ConnectionLost,
}

impl<T> SessionEvent<T> {
    pub fn channel() -> (mpsc::Sender<SessionEvent<T>>, mpsc::Receiver<SessionEvent<T>>) {
        mpsc::channel(256)
    }
}
