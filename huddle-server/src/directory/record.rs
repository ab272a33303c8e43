use huddle_core::{RoomId, UserId};

/// Durable room record as held by the directory. The password hash never
/// leaves the directory boundary in plaintext-comparable form.
#[derive(Debug, Clone)]
pub struct RoomRecord {
    pub id: RoomId,
    pub meeting_code: String,
    pub title: Option<String>,
    pub is_public: bool,
    pub join_password_hash: Option<String>,
    pub owner_user_id: UserId,
    pub is_active: bool,
}

/// Input for room creation. The join password arrives in plaintext and is
/// hashed by the directory.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub meeting_code: String,
    pub title: Option<String>,
    pub is_public: bool,
    pub join_password: Option<String>,
    pub owner_user_id: UserId,
}
