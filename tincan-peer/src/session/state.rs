/// Negotiation phase of the one connection a session owns.
///
/// `HaveRemoteOffer` only exists while an inbound offer is being processed;
/// observers normally see `Idle` → `HaveLocalOffer` → `Stable` (initiator)
/// or `Idle` → `Stable` (answerer). `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    /// No description set yet.
    Idle,
    /// Local offer created and set, waiting for the peer's answer.
    HaveLocalOffer,
    /// Inbound offer being applied, answer not yet set.
    HaveRemoteOffer,
    /// Both descriptions set and agreed.
    Stable,
    /// Torn down. Never left.
    Closed,
}

impl SignalingState {
    /// True while an offer (ours or theirs) is in flight.
    pub fn negotiation_pending(&self) -> bool {
        matches!(
            self,
            SignalingState::HaveLocalOffer | SignalingState::HaveRemoteOffer
        )
    }
}
