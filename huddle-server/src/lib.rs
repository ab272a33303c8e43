pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod registry;
pub mod room;
pub mod signaling;

pub use auth::{AuthError, Claims, IdentityVerifier, JwtVerifier, VerifiedIdentity};
pub use config::ServerConfig;
pub use directory::{DirectoryError, MemoryRoomDirectory, NewRoom, RoomDirectory, RoomRecord};
pub use error::SignalError;
pub use registry::{ClosedConnection, ConnectionRegistry};
pub use room::{JoinOutcome, OccupancyTable};
pub use signaling::{SignalOutbound, SignalingCoordinator, SignalingService, SignalingState};
