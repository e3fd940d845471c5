use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Remote candidate payload, shaped after RTCIceCandidateInit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceCandidateInit {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_mline_index: Option<u16>,
}

impl IceCandidateInit {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_mline_index: None,
        }
    }
}

/// Everything that crosses the signaling channel between two room members.
/// Ordering within a single sender is preserved by the channel; nothing is
/// assumed about ordering across senders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum SignalMessage {
    Join {
        room: RoomId,
    },
    UserJoined {
        room: RoomId,
    },
    Offer {
        room: RoomId,
        sdp: String,
    },
    Answer {
        room: RoomId,
        sdp: String,
    },
    IceCandidate {
        room: RoomId,
        candidate: IceCandidateInit,
    },
}

impl SignalMessage {
    /// Room the message belongs to.
    pub fn room(&self) -> &RoomId {
        match self {
            SignalMessage::Join { room }
            | SignalMessage::UserJoined { room }
            | SignalMessage::Offer { room, .. }
            | SignalMessage::Answer { room, .. }
            | SignalMessage::IceCandidate { room, .. } => room,
        }
    }
}
