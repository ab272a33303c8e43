use crate::model::{RoomId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

/// Negotiation role assigned on pairing. Purely positional: the second
/// arrival offers, the first answers, so both sides never offer at once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PeerRole {
    Offerer,
    Answerer,
}

/// Protocol-level failure codes sent back to the originating connection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinErrorCode {
    Unauthenticated,
    NotFound,
    WrongPassword,
    RoomFull,
    Forbidden,
}

/// Messages a client may send over the signaling socket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d")]
pub enum ClientSignal {
    /// Bearer token handshake. Must be the first frame on the socket.
    #[serde(rename = "auth")]
    Auth { token: String },
    #[serde(rename = "join", rename_all = "camelCase")]
    Join {
        room_id_or_code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
    #[serde(rename = "leave", rename_all = "camelCase")]
    Leave { room_id: RoomId },
    #[serde(rename = "close_room", rename_all = "camelCase")]
    CloseRoom { room_id: RoomId },
    /// SDP offer for the other occupant; the description is opaque here.
    #[serde(rename = "offer", rename_all = "camelCase")]
    Offer { room_id: RoomId, description: Value },
    #[serde(rename = "answer", rename_all = "camelCase")]
    Answer { room_id: RoomId, description: Value },
    #[serde(rename = "ice", rename_all = "camelCase")]
    Ice { room_id: RoomId, candidate: Value },
    #[serde(rename = "chat", rename_all = "camelCase")]
    Chat { room_id: RoomId, text: String },
}

/// Messages the server emits to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d")]
pub enum ServerSignal {
    /// Sent once, right after successful authentication.
    #[serde(rename = "rtc_config", rename_all = "camelCase")]
    RtcConfig { ice_servers: Vec<IceServerConfig> },
    /// `role` is `None` for the first occupant; the pairing `ready`
    /// notification carries the final designation.
    #[serde(rename = "join:success", rename_all = "camelCase")]
    JoinSuccess {
        room_id: RoomId,
        role: Option<PeerRole>,
    },
    #[serde(rename = "join:error")]
    JoinError(JoinErrorCode),
    /// Both occupants get this once the room pairs up.
    #[serde(rename = "ready", rename_all = "camelCase")]
    Ready { make_offer: bool },
    #[serde(rename = "peer:joined", rename_all = "camelCase")]
    PeerJoined { user_id: UserId },
    #[serde(rename = "peer:left", rename_all = "camelCase")]
    PeerLeft { user_id: UserId },
    /// The owner left; the room record is gone and everyone is evicted.
    #[serde(rename = "room-deleted")]
    RoomDeleted,
    #[serde(rename = "room_closed")]
    RoomClosed,
    #[serde(rename = "error")]
    Error(JoinErrorCode),
    /// Relayed negotiation payloads, forwarded verbatim.
    #[serde(rename = "offer")]
    Offer(Value),
    #[serde(rename = "answer")]
    Answer(Value),
    #[serde(rename = "ice")]
    Ice(Value),
    #[serde(rename = "chat:msg")]
    ChatMsg { sender: String, text: String, ts: u64 },
}
