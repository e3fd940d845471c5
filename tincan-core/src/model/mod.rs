mod room;
mod sdp;
mod signaling;

pub use room::RoomId;
pub use sdp::{SdpKind, SessionDescription};
pub use signaling::{IceCandidateInit, SignalMessage};
