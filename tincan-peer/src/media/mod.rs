mod provider;
mod session;

pub use provider::MediaProvider;
pub use session::LocalMediaSession;
