use thiserror::Error;

/// Failures surfaced by a connection backend. None of these are fatal to
/// the process; the worst outcome is a failed connection attempt.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("connection is closed")]
    Closed,

    #[error("invalid session description: {0}")]
    Sdp(String),

    #[error("invalid ICE candidate: {0}")]
    Candidate(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Local capture device unavailable or permission denied. The session
/// degrades to receive-only instead of aborting.
#[derive(Debug, Error)]
#[error("media capture failed: {reason}")]
pub struct CaptureError {
    pub reason: String,
}

impl CaptureError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
