use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tincan_peer::{CaptureError, MediaProvider};
use tokio::sync::Notify;

pub struct MockTrackInner {
    pub id: String,
    stopped: AtomicBool,
}

impl MockTrackInner {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

pub type MockTrack = Arc<MockTrackInner>;

/// Capture source backed by canned tracks. Acquisition can be made to
/// fail, or gated on a `Notify` so tests can decide exactly when the
/// "device" answers.
pub struct MockMediaProvider {
    tracks: Vec<MockTrack>,
    fail: bool,
    gate: Option<Arc<Notify>>,
    stopped: Mutex<Vec<String>>,
}

impl MockMediaProvider {
    pub fn with_tracks(count: usize) -> Self {
        let tracks = (0..count)
            .map(|i| {
                Arc::new(MockTrackInner {
                    id: format!("track-{i}"),
                    stopped: AtomicBool::new(false),
                })
            })
            .collect();
        Self {
            tracks,
            fail: false,
            gate: None,
            stopped: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            tracks: Vec::new(),
            fail: true,
            gate: None,
            stopped: Mutex::new(Vec::new()),
        }
    }

    /// Acquisition suspends until the returned gate is notified.
    pub fn gated(count: usize) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut provider = Self::with_tracks(count);
        provider.gate = Some(gate.clone());
        (provider, gate)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn stopped_ids(&self) -> Vec<String> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn all_tracks_stopped(&self) -> bool {
        !self.tracks.is_empty() && self.tracks.iter().all(|t| t.is_stopped())
    }
}

#[async_trait]
impl MediaProvider for MockMediaProvider {
    type Track = MockTrack;

    async fn request_local_tracks(&self) -> Result<Vec<Self::Track>, CaptureError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(CaptureError::new("capture device denied"));
        }
        Ok(self.tracks.clone())
    }

    async fn stop_track(&self, track: &Self::Track) {
        track.stopped.store(true, Ordering::SeqCst);
        self.stopped.lock().unwrap().push(track.id.clone());
    }
}
