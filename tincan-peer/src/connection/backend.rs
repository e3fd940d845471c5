use crate::error::ConnectionError;
use async_trait::async_trait;
use tincan_core::{IceCandidateInit, SessionDescription};

/// The connection primitive the negotiation engine drives. Every method
/// may suspend and may fail; the state machine owns the ordering of calls.
///
/// `set_local_description` with a `Rollback` description discards an
/// outstanding local offer and must complete before a conflicting remote
/// offer is applied.
#[async_trait]
pub trait ConnectionBackend: Send + Sync + 'static {
    /// Local capture track type this backend can attach. Tracks are cheap
    /// handles (`Arc` in practice): the session keeps one for release while
    /// the connection holds another.
    type Track: Clone + Send + Sync + 'static;

    async fn create_offer(&self) -> Result<String, ConnectionError>;

    async fn create_answer(&self) -> Result<String, ConnectionError>;

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), ConnectionError>;

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), ConnectionError>;

    async fn add_ice_candidate(&self, candidate: IceCandidateInit) -> Result<(), ConnectionError>;

    async fn add_track(&self, track: Self::Track) -> Result<(), ConnectionError>;

    /// Close the underlying connection. Called at most once by the session.
    async fn close(&self) -> Result<(), ConnectionError>;
}
