use crate::media::provider::MediaProvider;
use std::sync::Arc;
use tracing::debug;

/// Owns the tracks acquired for one call and guarantees they are stopped
/// exactly once, whether acquisition completed, failed, or was overtaken by
/// teardown.
pub struct LocalMediaSession<M: MediaProvider> {
    provider: Arc<M>,
    tracks: Vec<M::Track>,
    released: bool,
}

impl<M: MediaProvider> LocalMediaSession<M> {
    pub fn new(provider: Arc<M>) -> Self {
        Self {
            provider,
            tracks: Vec::new(),
            released: false,
        }
    }

    pub fn provider(&self) -> Arc<M> {
        self.provider.clone()
    }

    /// Take ownership of freshly acquired tracks. Tracks arriving after the
    /// session was released are stopped immediately instead of stored.
    pub async fn store(&mut self, tracks: Vec<M::Track>) {
        if self.released {
            debug!("tracks arrived after release, stopping them");
            for track in &tracks {
                self.provider.stop_track(track).await;
            }
            return;
        }
        self.tracks = tracks;
    }

    pub fn tracks(&self) -> &[M::Track] {
        &self.tracks
    }

    /// Stop every held track. Safe to call before acquisition completed and
    /// a no-op the second time.
    pub async fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for track in self.tracks.drain(..) {
            self.provider.stop_track(&track).await;
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}
