use crate::directory::DirectoryError;
use huddle_core::JoinErrorCode;
use thiserror::Error;

/// Failures inside the join/leave/close protocol. Recovered at the
/// coordinator boundary and translated into a wire error code; they never
/// terminate the connection itself. Authentication failure is the one
/// exception and is handled separately ([`crate::auth::AuthError`]).
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("connection is not authenticated")]
    Unauthenticated,
    #[error("room not found")]
    NotFound,
    #[error("wrong or missing room password")]
    WrongPassword,
    #[error("room already has two occupants")]
    RoomFull,
    #[error("caller is not the room owner")]
    Forbidden,
    #[error("room directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl SignalError {
    /// Wire code for this error, sent back to the originating connection.
    pub fn code(&self) -> JoinErrorCode {
        match self {
            SignalError::Unauthenticated => JoinErrorCode::Unauthenticated,
            SignalError::NotFound => JoinErrorCode::NotFound,
            SignalError::WrongPassword => JoinErrorCode::WrongPassword,
            SignalError::RoomFull => JoinErrorCode::RoomFull,
            SignalError::Forbidden => JoinErrorCode::Forbidden,
            // A failing durable store is indistinguishable from a missing
            // room as far as the caller is concerned.
            SignalError::Directory(_) => JoinErrorCode::NotFound,
        }
    }
}
