use huddle_core::{ConnId, ServerSignal};

/// Sink the coordinator pushes outbound signals through. The WebSocket
/// layer implements this over per-connection channels; tests substitute a
/// capturing mock. Sends are fire-and-forget channel pushes, so no room
/// state is ever held across them.
pub trait SignalOutbound: Send + Sync {
    fn send(&self, conn: ConnId, msg: ServerSignal);

    /// Force the connection closed (authentication failure).
    fn close(&self, conn: ConnId);
}
