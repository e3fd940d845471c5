use tincan_core::SignalMessage;
use tincan_peer::SignalingState;

use crate::integration::{init_tracing, spawn_peer};
use crate::utils::{MockMediaProvider, recv_signal};

#[tokio::test]
async fn test_join_emitted_on_activation() {
    init_tracing();

    let mut peer = spawn_peer("r1", "A", MockMediaProvider::with_tracks(0));

    let first = recv_signal(&mut peer.outbound)
        .await
        .expect("no outbound signal");
    match first {
        SignalMessage::Join { room } => assert_eq!(room.as_str(), "r1"),
        other => panic!("expected join, got {:?}", other),
    }

    // Announcing the room causes no negotiation by itself.
    assert_eq!(peer.handle.signaling_state(), SignalingState::Idle);
    assert_eq!(peer.backend.offers_created(), 0);

    peer.handle.close().await;
}
