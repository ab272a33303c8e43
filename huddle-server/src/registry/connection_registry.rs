use crate::auth::VerifiedIdentity;
use dashmap::DashMap;
use huddle_core::{ConnId, RoomId};
use std::collections::HashSet;

/// Per-connection state. Created with no identity (pre-authentication);
/// the identity is attached exactly once.
#[derive(Debug, Default)]
pub struct ConnectionEntry {
    identity: Option<VerifiedIdentity>,
    joined: HashSet<RoomId>,
}

/// What a closing connection leaves behind. The joined-room set is the
/// only input disconnect reconciliation has.
#[derive(Debug)]
pub struct ClosedConnection {
    pub identity: Option<VerifiedIdentity>,
    pub joined: Vec<RoomId>,
}

/// Live mapping from connection handle to verified identity and current
/// room membership. Entries live exactly as long as their socket.
#[derive(Default)]
pub struct ConnectionRegistry {
    entries: DashMap<ConnId, ConnectionEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open(&self, conn: ConnId) {
        self.entries.insert(conn, ConnectionEntry::default());
    }

    /// Attach the verified identity. Returns false if the connection is
    /// unknown or already authenticated.
    pub fn attach_identity(&self, conn: ConnId, identity: VerifiedIdentity) -> bool {
        match self.entries.get_mut(&conn) {
            Some(mut entry) if entry.identity.is_none() => {
                entry.identity = Some(identity);
                true
            }
            _ => false,
        }
    }

    pub fn identity(&self, conn: ConnId) -> Option<VerifiedIdentity> {
        self.entries.get(&conn).and_then(|e| e.identity.clone())
    }

    pub fn add_room(&self, conn: ConnId, room: RoomId) {
        if let Some(mut entry) = self.entries.get_mut(&conn) {
            entry.joined.insert(room);
        }
    }

    pub fn remove_room(&self, conn: ConnId, room: RoomId) {
        if let Some(mut entry) = self.entries.get_mut(&conn) {
            entry.joined.remove(&room);
        }
    }

    pub fn has_joined(&self, conn: ConnId, room: RoomId) -> bool {
        self.entries
            .get(&conn)
            .is_some_and(|e| e.joined.contains(&room))
    }

    /// Remove the entry and hand its last-known state to the cleanup pass.
    pub fn on_close(&self, conn: ConnId) -> Option<ClosedConnection> {
        self.entries.remove(&conn).map(|(_, entry)| ClosedConnection {
            identity: entry.identity,
            joined: entry.joined.into_iter().collect(),
        })
    }
}
