use crate::auth::{AuthError, IdentityVerifier, VerifiedIdentity};
use crate::directory::{DirectoryError, RoomDirectory};
use crate::error::SignalError;
use crate::registry::ConnectionRegistry;
use crate::room::{JoinOutcome, OccupancyTable};
use crate::signaling::SignalOutbound;
use huddle_core::{ClientSignal, ConnId, IceServerConfig, PeerRole, RoomId, ServerSignal};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Orchestration core of the signaling server.
///
/// Authenticates live connections, runs the join protocol against the
/// durable directory and the live occupancy table, relays negotiation
/// payloads between paired occupants, and reconciles room state on
/// leave/close/disconnect. Owns no transport: outbound traffic goes
/// through [`SignalOutbound`], which lets tests drive the whole protocol
/// without sockets.
pub struct SignalingCoordinator {
    registry: ConnectionRegistry,
    occupancy: OccupancyTable,
    directory: Arc<dyn RoomDirectory>,
    verifier: Arc<dyn IdentityVerifier>,
    outbound: Arc<dyn SignalOutbound>,
    ice_servers: Vec<IceServerConfig>,
}

impl SignalingCoordinator {
    pub fn new(
        directory: Arc<dyn RoomDirectory>,
        verifier: Arc<dyn IdentityVerifier>,
        outbound: Arc<dyn SignalOutbound>,
        ice_servers: Vec<IceServerConfig>,
    ) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            occupancy: OccupancyTable::new(),
            directory,
            verifier,
            outbound,
            ice_servers,
        }
    }

    /// Register a freshly opened connection (identity absent).
    pub fn on_open(&self, conn: ConnId) {
        self.registry.on_open(conn);
    }

    /// Handle one inbound signal. Returns `false` when the connection
    /// must be closed (authentication failure is the only such case —
    /// every protocol error is answered with an error event instead).
    pub async fn handle_signal(&self, conn: ConnId, signal: ClientSignal) -> bool {
        match signal {
            ClientSignal::Auth { token } => match self.authenticate(conn, &token).await {
                Ok(identity) => {
                    info!(%conn, user = %identity.user_id, "connection authenticated");
                    self.outbound.send(
                        conn,
                        ServerSignal::RtcConfig {
                            ice_servers: self.ice_servers.clone(),
                        },
                    );
                    true
                }
                Err(e) => {
                    warn!(%conn, error = %e, "authentication failed, closing connection");
                    self.outbound.close(conn);
                    false
                }
            },
            ClientSignal::Join {
                room_id_or_code,
                password,
            } => {
                if let Err(e) = self.join(conn, &room_id_or_code, password.as_deref()).await {
                    debug!(%conn, error = %e, "join rejected");
                    self.outbound.send(conn, ServerSignal::JoinError(e.code()));
                }
                true
            }
            ClientSignal::Leave { room_id } => {
                if let Err(e) = self.leave(conn, room_id).await {
                    self.outbound.send(conn, ServerSignal::Error(e.code()));
                }
                true
            }
            ClientSignal::CloseRoom { room_id } => {
                if let Err(e) = self.close_room(conn, room_id).await {
                    self.outbound.send(conn, ServerSignal::Error(e.code()));
                }
                true
            }
            ClientSignal::Offer {
                room_id,
                description,
            } => {
                self.relay(conn, room_id, |_| ServerSignal::Offer(description.clone()));
                true
            }
            ClientSignal::Answer {
                room_id,
                description,
            } => {
                self.relay(conn, room_id, |_| ServerSignal::Answer(description.clone()));
                true
            }
            ClientSignal::Ice { room_id, candidate } => {
                self.relay(conn, room_id, |_| ServerSignal::Ice(candidate.clone()));
                true
            }
            ClientSignal::Chat { room_id, text } => {
                let ts = epoch_ms();
                self.relay(conn, room_id, |identity| ServerSignal::ChatMsg {
                    sender: identity.name.clone(),
                    text: text.clone(),
                    ts,
                });
                true
            }
        }
    }

    /// Verify the bearer token and attach the identity to the entry.
    /// There is no retry and no partially-authenticated state: a failure
    /// here terminates the connection.
    pub async fn authenticate(
        &self,
        conn: ConnId,
        token: &str,
    ) -> Result<VerifiedIdentity, AuthError> {
        let identity = self.verifier.verify(token).await?;
        if !self.registry.attach_identity(conn, identity.clone()) {
            // Unknown connection, or a second auth frame on an already
            // authenticated socket.
            return Err(AuthError::InvalidToken);
        }
        Ok(identity)
    }

    /// Join protocol: authenticated -> looked-up -> password-checked ->
    /// capacity-checked -> joined. Failure at any step aborts with its
    /// code and mutates nothing.
    pub async fn join(
        &self,
        conn: ConnId,
        room_id_or_code: &str,
        password: Option<&str>,
    ) -> Result<(), SignalError> {
        let identity = self
            .registry
            .identity(conn)
            .ok_or(SignalError::Unauthenticated)?;

        let record = self
            .directory
            .find_by_id_or_code(room_id_or_code)
            .await?
            .filter(|r| r.is_active)
            .ok_or(SignalError::NotFound)?;

        if !record.is_public {
            let plaintext = password.ok_or(SignalError::WrongPassword)?;
            if !self.directory.verify_password(&record, plaintext).await? {
                return Err(SignalError::WrongPassword);
            }
        }

        // Directory work is done; the occupancy mutation below is the
        // linearization point for capacity and role assignment.
        match self
            .occupancy
            .try_join(record.id, conn, &record.owner_user_id)
        {
            JoinOutcome::Full => Err(SignalError::RoomFull),
            JoinOutcome::Waiting => {
                self.registry.add_room(conn, record.id);
                info!(%conn, room = %record.id, "joined as first occupant");
                self.outbound.send(
                    conn,
                    ServerSignal::JoinSuccess {
                        room_id: record.id,
                        role: None,
                    },
                );
                Ok(())
            }
            JoinOutcome::Paired { answerer } => {
                self.registry.add_room(conn, record.id);
                info!(%conn, room = %record.id, peer = %answerer, "room paired");
                self.outbound.send(
                    conn,
                    ServerSignal::JoinSuccess {
                        room_id: record.id,
                        role: Some(PeerRole::Offerer),
                    },
                );
                self.outbound.send(
                    answerer,
                    ServerSignal::PeerJoined {
                        user_id: identity.user_id.clone(),
                    },
                );
                // The joiner offers, the earlier occupant answers.
                self.outbound
                    .send(conn, ServerSignal::Ready { make_offer: true });
                self.outbound
                    .send(answerer, ServerSignal::Ready { make_offer: false });
                Ok(())
            }
            JoinOutcome::AlreadyMember => {
                // Duplicate join frame; re-acknowledge with the current
                // positional role, touch nothing.
                self.outbound.send(
                    conn,
                    ServerSignal::JoinSuccess {
                        room_id: record.id,
                        role: self.occupancy.role_of(record.id, conn),
                    },
                );
                Ok(())
            }
        }
    }

    /// Explicit leave. Owner departure additionally deletes the durable
    /// record and evicts every remaining occupant.
    pub async fn leave(&self, conn: ConnId, room: RoomId) -> Result<(), SignalError> {
        let identity = self
            .registry
            .identity(conn)
            .ok_or(SignalError::Unauthenticated)?;

        self.depart(conn, &identity, room).await;
        Ok(())
    }

    /// Owner-only teardown of a live room and its durable record.
    pub async fn close_room(&self, conn: ConnId, room: RoomId) -> Result<(), SignalError> {
        let identity = self
            .registry
            .identity(conn)
            .ok_or(SignalError::Unauthenticated)?;

        // The directory is authoritative for ownership.
        let record = self
            .directory
            .find_by_id_or_code(&room.to_string())
            .await?
            .ok_or(SignalError::NotFound)?;
        if record.owner_user_id != identity.user_id {
            return Err(SignalError::Forbidden);
        }

        self.delete_record(room).await;
        for member in self.occupancy.remove(room) {
            self.registry.remove_room(member, room);
            self.outbound.send(member, ServerSignal::RoomClosed);
        }
        info!(%conn, %room, "room closed by owner");
        Ok(())
    }

    /// Disconnect reconciliation. Applies the same departure logic as an
    /// explicit leave to every room the connection held, independently:
    /// one room's failure never blocks the others, and nothing is
    /// surfaced — the client is already gone.
    pub async fn on_close(&self, conn: ConnId) {
        let Some(closed) = self.registry.on_close(conn) else {
            return;
        };
        let Some(identity) = closed.identity else {
            // Never authenticated, so it never joined anything.
            return;
        };

        for room in closed.joined {
            self.depart(conn, &identity, room).await;
        }
        info!(%conn, user = %identity.user_id, "connection closed");
    }

    pub fn occupancy(&self) -> &OccupancyTable {
        &self.occupancy
    }

    /// Shared departure path for explicit leave and disconnect: remove
    /// the member, notify the remainder, and tear the room down if the
    /// departing user owns it.
    async fn depart(&self, conn: ConnId, identity: &VerifiedIdentity, room: RoomId) {
        let was_owner = self.occupancy.is_owner(room, &identity.user_id);

        let Some(remaining) = self.occupancy.leave(room, conn) else {
            // Not a member (already evicted, or a stale leave frame).
            self.registry.remove_room(conn, room);
            return;
        };
        self.registry.remove_room(conn, room);

        for member in &remaining {
            self.outbound.send(
                *member,
                ServerSignal::PeerLeft {
                    user_id: identity.user_id.clone(),
                },
            );
        }

        if was_owner {
            self.delete_record(room).await;
            for member in self.occupancy.remove(room) {
                self.registry.remove_room(member, room);
                self.outbound.send(member, ServerSignal::RoomDeleted);
            }
        }
    }

    /// Fire-and-forget durable delete. An already-missing record counts
    /// as success, which makes concurrent owner departures idempotent.
    async fn delete_record(&self, room: RoomId) {
        match self.directory.delete(room).await {
            Ok(()) | Err(DirectoryError::NotFound) => {}
            Err(e) => warn!(%room, error = %e, "room record delete failed"),
        }
    }

    /// Best-effort relay to the other occupant(s) of the room. A sender
    /// outside the room, or a room with nobody else in it, drops the
    /// message silently: no buffering, no retransmission.
    fn relay<F>(&self, conn: ConnId, room: RoomId, build: F)
    where
        F: Fn(&VerifiedIdentity) -> ServerSignal,
    {
        if !self.registry.has_joined(conn, room) {
            debug!(%conn, %room, "dropping relay from non-member");
            return;
        }
        // has_joined implies an attached identity.
        let Some(identity) = self.registry.identity(conn) else {
            return;
        };

        for member in self.occupancy.members(room) {
            if member != conn {
                self.outbound.send(member, build(&identity));
            }
        }
    }
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
