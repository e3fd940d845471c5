pub mod model;

pub use model::{IceCandidateInit, RoomId, SdpKind, SessionDescription, SignalMessage};
