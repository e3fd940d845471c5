use tincan_peer::SignalingState;

use crate::integration::{init_tracing, spawn_peer};
use crate::utils::{MockMediaProvider, eventually, recv_join, wait_for_state};

/// Teardown races a still-suspended capture request: when the device
/// finally answers, the already-granted tracks are stopped instead of
/// attached, so a cancelled request cannot leak capture resources.
#[tokio::test]
async fn test_capture_resolves_after_teardown() {
    init_tracing();

    let (provider, gate) = MockMediaProvider::gated(2);
    let mut peer = spawn_peer("r1", "A", provider);
    recv_join(&mut peer.outbound).await.expect("join");

    peer.handle.close().await;
    wait_for_state(&peer.handle, SignalingState::Closed, 1000)
        .await
        .expect("session did not close");

    // The "device" grants access only now, after the session is gone.
    gate.notify_one();

    eventually(1000, || peer.media.all_tracks_stopped())
        .await
        .expect("late-granted tracks leaked");
    assert!(peer.backend.added_tracks().is_empty());
}
