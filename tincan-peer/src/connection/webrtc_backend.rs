use crate::connection::backend::ConnectionBackend;
use crate::connection::config::ConnectionConfig;
use crate::error::ConnectionError;
use crate::session::SessionEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tincan_core::{IceCandidateInit, SdpKind, SessionDescription};
use tokio::sync::mpsc;
use tracing::info;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

/// Track type attached through the webrtc-rs backend.
pub type WebRtcTrack = Arc<dyn TrackLocal + Send + Sync>;

/// `ConnectionBackend` over a real webrtc-rs `RTCPeerConnection`.
///
/// Locally discovered candidates and connection-state drops are pushed into
/// the session's event channel, which the session loop merges with inbound
/// signaling.
pub struct WebRtcBackend {
    peer_connection: Arc<RTCPeerConnection>,
}

impl WebRtcBackend {
    pub async fn new(
        config: ConnectionConfig,
        events: mpsc::Sender<SessionEvent<WebRtcTrack>>,
    ) -> Result<Self, ConnectionError> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()
            .map_err(|e| ConnectionError::Backend(e.to_string()))?;
        let registry = register_default_interceptors(Registry::new(), &mut m)
            .map_err(|e| ConnectionError::Backend(e.to_string()))?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: vec![RTCIceServer {
                urls: config.ice_servers,
                credential: String::new(),
                username: String::new(),
            }],
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .map_err(|e| ConnectionError::Backend(e.to_string()))?,
        );

        // Trickle ICE: every locally gathered candidate goes straight to the
        // session for forwarding, whatever the negotiation state is.
        let ice_tx = events.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let init = IceCandidateInit {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_mline_index: init.sdp_mline_index,
                };
                let _ = tx.send(SessionEvent::LocalCandidate(init)).await;
            })
        }));

        let state_tx = events.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                Box::pin(async move {
                    info!("peer connection state changed: {:?}", s);
                    match s {
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            let _ = tx.send(SessionEvent::ConnectionLost).await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        Ok(Self { peer_connection })
    }

    fn to_rtc_description(desc: SessionDescription) -> Result<RTCSessionDescription, ConnectionError> {
        match desc.kind {
            SdpKind::Offer => RTCSessionDescription::offer(desc.sdp)
                .map_err(|e| ConnectionError::Sdp(e.to_string())),
            SdpKind::Answer => RTCSessionDescription::answer(desc.sdp)
                .map_err(|e| ConnectionError::Sdp(e.to_string())),
            SdpKind::Rollback => {
                let mut rollback = RTCSessionDescription::default();
                rollback.sdp_type = RTCSdpType::Rollback;
                Ok(rollback)
            }
        }
    }
}

#[async_trait]
impl ConnectionBackend for WebRtcBackend {
    type Track = WebRtcTrack;

    async fn create_offer(&self) -> Result<String, ConnectionError> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .map_err(|e| ConnectionError::Backend(e.to_string()))?;
        Ok(offer.sdp)
    }

    async fn create_answer(&self) -> Result<String, ConnectionError> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .map_err(|e| ConnectionError::Backend(e.to_string()))?;
        Ok(answer.sdp)
    }

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), ConnectionError> {
        let desc = Self::to_rtc_description(desc)?;
        self.peer_connection
            .set_local_description(desc)
            .await
            .map_err(|e| ConnectionError::Backend(e.to_string()))
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), ConnectionError> {
        let desc = Self::to_rtc_description(desc)?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .map_err(|e| ConnectionError::Backend(e.to_string()))
    }

    async fn add_ice_candidate(&self, candidate: IceCandidateInit) -> Result<(), ConnectionError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_mline_index,
            username_fragment: None,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .map_err(|e| ConnectionError::Candidate(e.to_string()))
    }

    async fn add_track(&self, track: Self::Track) -> Result<(), ConnectionError> {
        self.peer_connection
            .add_track(track)
            .await
            .map_err(|e| ConnectionError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), ConnectionError> {
        self.peer_connection
            .close()
            .await
            .map_err(|e| ConnectionError::Backend(e.to_string()))
    }
}
