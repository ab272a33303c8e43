use super::{DirectoryError, NewRoom, RoomDirectory, RoomRecord};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use huddle_core::RoomId;
use std::str::FromStr;

/// In-memory room directory. Stands in for the durable store at the
/// interface the signaling core consumes; also used by tests.
#[derive(Default)]
pub struct MemoryRoomDirectory {
    rooms: DashMap<RoomId, RoomRecord>,
    by_code: DashMap<String, RoomId>,
}

impl MemoryRoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_password(plaintext: &str) -> Result<String, DirectoryError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DirectoryError::Hash(e.to_string()))
    }
}

#[async_trait]
impl RoomDirectory for MemoryRoomDirectory {
    async fn find_by_id_or_code(&self, key: &str) -> Result<Option<RoomRecord>, DirectoryError> {
        let id = match RoomId::from_str(key) {
            Ok(id) => Some(id),
            Err(_) => self.by_code.get(key).map(|e| *e.value()),
        };

        let record = id
            .and_then(|id| self.rooms.get(&id))
            .map(|e| e.value().clone())
            .filter(|r| r.is_active);
        Ok(record)
    }

    async fn verify_password(
        &self,
        record: &RoomRecord,
        plaintext: &str,
    ) -> Result<bool, DirectoryError> {
        let Some(hash) = record.join_password_hash.as_deref() else {
            return Ok(false);
        };
        let parsed = PasswordHash::new(hash).map_err(|e| DirectoryError::Hash(e.to_string()))?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DirectoryError::Hash(e.to_string())),
        }
    }

    async fn create(&self, room: NewRoom) -> Result<RoomRecord, DirectoryError> {
        let id = RoomId::new();

        // entry() holds the code-index shard lock, so two concurrent
        // creates with the same code cannot both pass the uniqueness check.
        match self.by_code.entry(room.meeting_code.clone()) {
            Entry::Occupied(_) => return Err(DirectoryError::DuplicateCode),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let join_password_hash = match (&room.is_public, &room.join_password) {
            (false, Some(plain)) => Some(Self::hash_password(plain)?),
            _ => None,
        };

        let record = RoomRecord {
            id,
            meeting_code: room.meeting_code,
            title: room.title,
            is_public: room.is_public,
            join_password_hash,
            owner_user_id: room.owner_user_id,
            is_active: true,
        };
        self.rooms.insert(id, record.clone());
        Ok(record)
    }

    async fn delete(&self, room_id: RoomId) -> Result<(), DirectoryError> {
        let Some((_, record)) = self.rooms.remove(&room_id) else {
            return Err(DirectoryError::NotFound);
        };
        self.by_code.remove(&record.meeting_code);
        Ok(())
    }
}
