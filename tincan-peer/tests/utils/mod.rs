pub mod mock_media;

pub use mock_backend::MockBackend;
pub use mock_media::{MockMediaProvider, MockTrack};
pub use mock_signaling::{RelaySide, captured_channel, spawn_relay};
pub use signal_helpers::*;
