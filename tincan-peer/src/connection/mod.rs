mod backend;
mod config;
mod webrtc_backend;

pub use backend::ConnectionBackend;
pub use config::ConnectionConfig;
pub use webrtc_backend::{WebRtcBackend, WebRtcTrack};
