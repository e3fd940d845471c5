use tincan_core::{IceCandidateInit, SignalMessage};
use tincan_peer::SignalingState;

use crate::integration::{init_tracing, spawn_peer};
use crate::utils::{MockMediaProvider, eventually, recv_join, wait_for_state};

/// A candidate that fails to apply is dropped and logged; the connection
/// and every later candidate are unaffected.
#[tokio::test]
async fn test_malformed_candidate_nonfatal() {
    init_tracing();

    let mut peer = spawn_peer("r1", "A", MockMediaProvider::with_tracks(0));
    recv_join(&mut peer.outbound).await.expect("join");

    peer.handle
        .deliver(SignalMessage::Offer {
            room: "r1".into(),
            sdp: "v=0 offer-B-1".to_owned(),
        })
        .await;
    wait_for_state(&peer.handle, SignalingState::Stable, 1000)
        .await
        .expect("offer not processed");

    peer.handle
        .deliver(SignalMessage::IceCandidate {
            room: "r1".into(),
            candidate: IceCandidateInit::new("malformed garbage"),
        })
        .await;
    peer.handle
        .deliver(SignalMessage::IceCandidate {
            room: "r1".into(),
            candidate: IceCandidateInit::new("candidate:good"),
        })
        .await;

    eventually(1000, || !peer.backend.applied_candidates().is_empty())
        .await
        .expect("good candidate not applied");
    assert_eq!(
        peer.backend.applied_candidates(),
        vec!["candidate:good".to_owned()]
    );
    assert_eq!(peer.handle.signaling_state(), SignalingState::Stable);

    peer.handle.close().await;
}
