mod conn;
mod room;
mod signaling;
mod user;

pub use conn::ConnId;
pub use room::RoomId;
pub use signaling::{ClientSignal, IceServerConfig, JoinErrorCode, PeerRole, ServerSignal};
pub use user::UserId;
