use crate::connection::ConnectionBackend;
use crate::media::{LocalMediaSession, MediaProvider};
use crate::session::command::SessionCommand;
use crate::session::event::SessionEvent;
use crate::session::state::SignalingState;
use crate::signaling::SignalChannel;
use std::sync::Arc;
use tincan_core::{IceCandidateInit, RoomId, SessionDescription, SignalMessage};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Cloneable handle to a running [`PeerSession`]. Dropping every handle
/// does not tear the session down by itself; the transport is expected to
/// call [`SessionHandle::close`] (teardown is also triggered when the
/// command channel closes).
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<SessionCommand>,
    state_rx: watch::Receiver<SignalingState>,
}

impl SessionHandle {
    /// Relay an inbound signal into the session. Signals delivered after
    /// teardown are silently dropped.
    pub async fn deliver(&self, msg: SignalMessage) {
        let _ = self.cmd_tx.send(SessionCommand::Signal(msg)).await;
    }

    /// Request teardown. Idempotent; a second call is a no-op.
    pub async fn close(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Shutdown).await;
    }

    pub fn signaling_state(&self) -> SignalingState {
        *self.state_rx.borrow()
    }

    /// Watch for signaling-state transitions.
    pub fn state_watch(&self) -> watch::Receiver<SignalingState> {
        self.state_rx.clone()
    }
}

/// One per room membership: owns the connection, the local media session
/// and the per-session signaling handle, and drives negotiation as a
/// single event loop. Never reused after close.
pub struct PeerSession<B, M>
where
    B: ConnectionBackend,
    M: MediaProvider<Track = B::Track>,
{
    id: Uuid,
    room: RoomId,
    backend: B,
    media: LocalMediaSession<M>,
    signaling: Arc<dyn SignalChannel>,
    state: SignalingState,
    state_tx: watch::Sender<SignalingState>,
    have_remote_description: bool,
    pending_candidates: Vec<IceCandidateInit>,
    cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: mpsc::Sender<SessionEvent<B::Track>>,
    event_rx: mpsc::Receiver<SessionEvent<B::Track>>,
    closed: bool,
}

impl<B, M> PeerSession<B, M>
where
    B: ConnectionBackend,
    M: MediaProvider<Track = B::Track>,
{
    pub fn new(
        room: RoomId,
        backend: B,
        media: Arc<M>,
        signaling: Arc<dyn SignalChannel>,
        event_tx: mpsc::Sender<SessionEvent<B::Track>>,
        event_rx: mpsc::Receiver<SessionEvent<B::Track>>,
    ) -> (Self, SessionHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(100);
        let (state_tx, state_rx) = watch::channel(SignalingState::Idle);

        let session = Self {
            id: Uuid::new_v4(),
            room,
            backend,
            media: LocalMediaSession::new(media),
            signaling,
            state: SignalingState::Idle,
            state_tx,
            have_remote_description: false,
            pending_candidates: Vec::new(),
            cmd_rx,
            event_tx,
            event_rx,
            closed: false,
        };
        let handle = SessionHandle { cmd_tx, state_rx };

        (session, handle)
    }

    /// Session event loop: announces the room, kicks off capture, then
    /// reacts to inbound signals and backend events until teardown.
    pub async fn run(mut self) {
        info!("session {} joining room '{}'", self.id, self.room);

        self.signaling
            .send(SignalMessage::Join {
                room: self.room.clone(),
            })
            .await;

        self.spawn_media_acquisition();

        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(SessionCommand::Signal(msg)) => self.handle_signal(msg).await,
                        Some(SessionCommand::Shutdown) => self.close().await,
                        None => {
                            debug!("command channel closed, tearing session down");
                            self.close().await;
                        }
                    }
                }

                evt = self.event_rx.recv() => {
                    match evt {
                        Some(e) => self.handle_event(e).await,
                        // Unreachable while we hold event_tx.
                        None => self.close().await,
                    }
                }
            }

            if self.closed {
                break;
            }
        }

        // Events already queued when teardown won the race still need a
        // look: a capture grant in there would otherwise leak its tracks.
        self.event_rx.close();
        while let Some(event) = self.event_rx.recv().await {
            if let SessionEvent::MediaReady(tracks) = event {
                self.media.store(tracks).await;
            }
        }

        info!("session {} finished", self.id);
    }

    /// Capture runs off the event loop; the result comes back as an event
    /// so the loop decides whether the session is still live when the
    /// device finally answers. If the loop is already gone the task stops
    /// the tracks itself rather than leak a granted capture.
    fn spawn_media_acquisition(&self) {
        let provider = self.media.provider();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            match provider.request_local_tracks().await {
                Ok(tracks) => {
                    if let Err(rejected) = event_tx.send(SessionEvent::MediaReady(tracks)).await {
                        if let SessionEvent::MediaReady(tracks) = rejected.0 {
                            for track in &tracks {
                                provider.stop_track(track).await;
                            }
                        }
                    }
                }
                Err(err) => {
                    let _ = event_tx.send(SessionEvent::MediaFailed(err)).await;
                }
            }
        });
    }

    /// Single dispatch point for everything the channel relays to us.
    /// Ignoring a message is always an explicit branch in the handlers.
    async fn handle_signal(&mut self, msg: SignalMessage) {
        if self.closed {
            return;
        }

        if msg.room() != &self.room {
            warn!(
                "dropping signal for room '{}' (session is in '{}')",
                msg.room(),
                self.room
            );
            return;
        }

        match msg {
            SignalMessage::Join { .. } => {
                // Our own announcement echoed back, or the transport leaks
                // join messages to members. Nothing for a peer to do.
                debug!("ignoring join signal");
            }
            SignalMessage::UserJoined { .. } => self.handle_user_joined().await,
            SignalMessage::Offer { sdp, .. } => self.handle_offer(sdp).await,
            SignalMessage::Answer { sdp, .. } => self.handle_answer(sdp).await,
            SignalMessage::IceCandidate { candidate, .. } => {
                self.handle_remote_candidate(candidate).await
            }
        }
    }

    /// A second member arrived: we were here first, so we initiate. The
    /// state guard doubles as the idempotence guard for duplicated
    /// user-joined notifications.
    async fn handle_user_joined(&mut self) {
        match self.state {
            SignalingState::Idle | SignalingState::Stable => {}
            other => {
                debug!("ignoring user-joined while {:?}", other);
                return;
            }
        }

        let sdp = match self.backend.create_offer().await {
            Ok(sdp) => sdp,
            Err(e) => {
                warn!("failed to create offer: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .backend
            .set_local_description(SessionDescription::offer(sdp.clone()))
            .await
        {
            warn!("failed to set local offer: {}", e);
            return;
        }
        self.set_state(SignalingState::HaveLocalOffer);

        self.signaling
            .send(SignalMessage::Offer {
                room: self.room.clone(),
                sdp,
            })
            .await;
    }

    async fn handle_offer(&mut self, sdp: String) {
        let mut prior = self.state;

        if self.state.negotiation_pending() {
            // Glare: both sides offered at once and we received theirs, so
            // we yield ours. The rollback must complete before the remote
            // offer is applied; the two calls are strictly sequenced.
            info!("conflicting offer received, discarding our outstanding local offer");
            if let Err(e) = self
                .backend
                .set_local_description(SessionDescription::rollback())
                .await
            {
                warn!("failed to roll back local offer: {}", e);
                return;
            }
            self.set_state(SignalingState::Idle);
            prior = SignalingState::Idle;
        }

        self.set_state(SignalingState::HaveRemoteOffer);
        if let Err(e) = self
            .backend
            .set_remote_description(SessionDescription::offer(sdp))
            .await
        {
            warn!("failed to apply remote offer: {}", e);
            self.set_state(prior);
            return;
        }
        self.have_remote_description = true;
        self.drain_pending_candidates().await;

        let answer = match self.backend.create_answer().await {
            Ok(sdp) => sdp,
            Err(e) => {
                warn!("failed to create answer: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .backend
            .set_local_description(SessionDescription::answer(answer.clone()))
            .await
        {
            warn!("failed to set local answer: {}", e);
            return;
        }
        self.set_state(SignalingState::Stable);

        self.signaling
            .send(SignalMessage::Answer {
                room: self.room.clone(),
                sdp: answer,
            })
            .await;
    }

    async fn handle_answer(&mut self, sdp: String) {
        // An answer only means anything as the reply to our outstanding
        // offer; anything else is a stale or duplicated message.
        if self.state != SignalingState::HaveLocalOffer {
            debug!("discarding answer while {:?}", self.state);
            return;
        }

        match self
            .backend
            .set_remote_description(SessionDescription::answer(sdp))
            .await
        {
            Ok(()) => {
                self.have_remote_description = true;
                self.drain_pending_candidates().await;
                self.set_state(SignalingState::Stable);
                info!("negotiation complete");
            }
            Err(e) => warn!("failed to apply remote answer: {}", e),
        }
    }

    /// Trickle ICE, inbound side: candidates may outrun the offer they
    /// belong to, so they wait in `pending_candidates` until a remote
    /// description exists. A candidate that fails to apply is dropped,
    /// never retried.
    async fn handle_remote_candidate(&mut self, candidate: IceCandidateInit) {
        if !self.have_remote_description {
            debug!("buffering candidate until the remote description is set");
            self.pending_candidates.push(candidate);
            return;
        }

        if let Err(e) = self.backend.add_ice_candidate(candidate).await {
            warn!("dropping ICE candidate: {}", e);
        }
    }

    async fn drain_pending_candidates(&mut self) {
        for candidate in std::mem::take(&mut self.pending_candidates) {
            if let Err(e) = self.backend.add_ice_candidate(candidate).await {
                warn!("dropping buffered ICE candidate: {}", e);
            }
        }
    }

    async fn handle_event(&mut self, event: SessionEvent<B::Track>) {
        match event {
            SessionEvent::LocalCandidate(candidate) => {
                if self.closed {
                    return;
                }
                // Forwarded unconditionally, even before any remote
                // description exists (trickle ICE).
                self.signaling
                    .send(SignalMessage::IceCandidate {
                        room: self.room.clone(),
                        candidate,
                    })
                    .await;
            }

            SessionEvent::MediaReady(tracks) => {
                // Capture can resolve after teardown; store() stops the
                // tracks instead of keeping them once released.
                self.media.store(tracks).await;
                if self.closed {
                    return;
                }
                for track in self.media.tracks() {
                    if let Err(e) = self.backend.add_track(track.clone()).await {
                        warn!("failed to attach local track: {}", e);
                    }
                }
            }

            SessionEvent::MediaFailed(err) => {
                // Policy: the call continues receive-only.
                warn!("{}, continuing without local media", err);
            }

            SessionEvent::ConnectionLost => {
                info!("connection lost, tearing session down");
                self.close().await;
            }
        }
    }

    /// Exactly-once teardown: release capture, then the connection. The
    /// `closed` latch makes the second call a no-op and deafens every
    /// later signal.
    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        self.media.release().await;
        if let Err(e) = self.backend.close().await {
            warn!("error closing connection: {}", e);
        }
        self.set_state(SignalingState::Closed);
    }

    fn set_state(&mut self, state: SignalingState) {
        if self.state != state {
            debug!("signaling state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        let _ = self.state_tx.send(state);
    }
}
