use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use huddle_core::{ConnId, PeerRole, RoomId, UserId};

/// Live membership of one room. At most two connections, in arrival
/// order; the owner user id is snapshotted from the durable record at
/// first join.
#[derive(Debug)]
pub struct RoomOccupancy {
    members: Vec<ConnId>,
    owner: UserId,
}

/// Outcome of a join attempt against the live table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Two occupants already; nothing was mutated.
    Full,
    /// Caller is the lone occupant; negotiation waits for a peer.
    Waiting,
    /// Caller completed the pair and becomes offerer; the earlier
    /// occupant answers and must be re-notified.
    Paired { answerer: ConnId },
    /// Caller is already a member; nothing was mutated.
    AlreadyMember,
}

/// In-memory room occupancy, independent of the durable directory. The
/// table is the single authority for capacity and for broadcast targets;
/// every mutation for a given room happens under that room's entry guard,
/// so concurrent joins are linearized and the two-occupant cap and the
/// second-arrival-offers rule hold under any interleaving.
#[derive(Default)]
pub struct OccupancyTable {
    rooms: DashMap<RoomId, RoomOccupancy>,
}

impl OccupancyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to add `conn` to the room, creating the live entry on first
    /// join. No I/O happens under the guard; callers do directory work
    /// before calling in.
    pub fn try_join(&self, room: RoomId, conn: ConnId, owner: &UserId) -> JoinOutcome {
        match self.rooms.entry(room) {
            Entry::Vacant(slot) => {
                slot.insert(RoomOccupancy {
                    members: vec![conn],
                    owner: owner.clone(),
                });
                JoinOutcome::Waiting
            }
            Entry::Occupied(mut slot) => {
                let occupancy = slot.get_mut();
                if occupancy.members.contains(&conn) {
                    return JoinOutcome::AlreadyMember;
                }
                if occupancy.members.len() >= 2 {
                    return JoinOutcome::Full;
                }
                let answerer = occupancy.members[0];
                occupancy.members.push(conn);
                JoinOutcome::Paired { answerer }
            }
        }
    }

    /// Remove `conn` from the room and return the remaining members. An
    /// emptied room entry is dropped. Returns `None` when the room or the
    /// membership was unknown.
    pub fn leave(&self, room: RoomId, conn: ConnId) -> Option<Vec<ConnId>> {
        match self.rooms.entry(room) {
            Entry::Vacant(_) => None,
            Entry::Occupied(mut slot) => {
                let occupancy = slot.get_mut();
                let before = occupancy.members.len();
                occupancy.members.retain(|m| *m != conn);
                if occupancy.members.len() == before {
                    return None;
                }
                let remaining = occupancy.members.clone();
                if remaining.is_empty() {
                    slot.remove();
                }
                Some(remaining)
            }
        }
    }

    /// Drop the room entry entirely, returning the evicted members.
    pub fn remove(&self, room: RoomId) -> Vec<ConnId> {
        self.rooms
            .remove(&room)
            .map(|(_, occ)| occ.members)
            .unwrap_or_default()
    }

    /// Membership snapshot for relay routing. Atomic with respect to
    /// concurrent joins/leaves: the read holds the same guard mutations
    /// take.
    pub fn members(&self, room: RoomId) -> Vec<ConnId> {
        self.rooms
            .get(&room)
            .map(|occ| occ.members.clone())
            .unwrap_or_default()
    }

    /// Positional role of a current member, if any. Only meaningful once
    /// the room is paired; a lone occupant has no role yet.
    pub fn role_of(&self, room: RoomId, conn: ConnId) -> Option<PeerRole> {
        let occ = self.rooms.get(&room)?;
        if occ.members.len() < 2 {
            return None;
        }
        match occ.members.iter().position(|m| *m == conn)? {
            0 => Some(PeerRole::Answerer),
            _ => Some(PeerRole::Offerer),
        }
    }

    /// Compare against the owner snapshot taken at first join.
    pub fn is_owner(&self, room: RoomId, user: &UserId) -> bool {
        self.rooms
            .get(&room)
            .is_some_and(|occ| occ.owner == *user)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
