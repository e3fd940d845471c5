use tincan_core::SignalMessage;
use tincan_peer::SignalingState;

use crate::integration::{init_tracing, spawn_peer};
use crate::utils::{MockMediaProvider, recv_join};

/// Signals tagged with another room never reach the state machine.
#[tokio::test]
async fn test_wrong_room_dropped() {
    init_tracing();

    let mut peer = spawn_peer("r1", "A", MockMediaProvider::with_tracks(0));
    recv_join(&mut peer.outbound).await.expect("join");

    peer.handle
        .deliver(SignalMessage::UserJoined { room: "r2".into() })
        .await;
    peer.handle
        .deliver(SignalMessage::Offer {
            room: "r2".into(),
            sdp: "v=0 offer-B-1".to_owned(),
        })
        .await;
    tokio::task::yield_now().await;

    assert_eq!(peer.handle.signaling_state(), SignalingState::Idle);
    assert_eq!(peer.backend.offers_created(), 0);
    assert_eq!(peer.backend.remote_sdp(), None);

    peer.handle.close().await;
}
