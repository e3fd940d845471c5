mod channel;

pub use channel::SignalChannel;
