pub mod connection;
pub mod error;
pub mod media;
pub mod session;
pub mod signaling;

pub use connection::{ConnectionBackend, ConnectionConfig, WebRtcBackend};
pub use error::{CaptureError, ConnectionError};
pub use media::{LocalMediaSession, MediaProvider};
pub use session::{PeerSession, SessionCommand, SessionEvent, SessionHandle, SignalingState};
pub use signaling::SignalChannel;
