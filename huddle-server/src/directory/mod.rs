mod memory;
mod record;

pub use memory::MemoryRoomDirectory;
pub use record::{NewRoom, RoomRecord};

use async_trait::async_trait;
use huddle_core::RoomId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("room not found")]
    NotFound,
    #[error("meeting code already exists")]
    DuplicateCode,
    #[error("password hash error: {0}")]
    Hash(String),
}

/// Durable store of room records. The signaling core treats this as
/// read-mostly external state, except for the deletes it issues on owner
/// departure. Capacity is never decided here; the live occupancy table is
/// authoritative for that.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Resolve a room by its internal id or its meeting code. Inactive
    /// rooms resolve to `None`.
    async fn find_by_id_or_code(&self, key: &str) -> Result<Option<RoomRecord>, DirectoryError>;

    /// Check a plaintext join password against the record's stored hash.
    async fn verify_password(
        &self,
        record: &RoomRecord,
        plaintext: &str,
    ) -> Result<bool, DirectoryError>;

    async fn create(&self, room: NewRoom) -> Result<RoomRecord, DirectoryError>;

    async fn delete(&self, room_id: RoomId) -> Result<(), DirectoryError>;
}
