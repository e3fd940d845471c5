mod command;
mod event;
mod session;
mod state;

pub use command::SessionCommand;
pub use event::SessionEvent;
pub use session::{PeerSession, SessionHandle};
pub use state::SignalingState;
