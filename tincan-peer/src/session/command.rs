use tincan_core::SignalMessage;

/// Commands fed into a session's event loop by the signaling transport.
#[derive(Debug)]
pub enum SessionCommand {
    /// Inbound signal relayed from the other room member.
    Signal(SignalMessage),

    /// Explicit teardown request.
    Shutdown,
}
