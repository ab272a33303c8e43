use crate::signaling::SignalOutbound;
use axum::extract::ws::Message;
use dashmap::DashMap;
use huddle_core::{ConnId, ServerSignal};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct ServiceInner {
    senders: DashMap<ConnId, mpsc::UnboundedSender<Message>>,
}

/// Holds the outbound half of every live WebSocket and turns
/// [`ServerSignal`]s into JSON text frames. Cloneable, shared between the
/// axum handlers and the coordinator.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<ServiceInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                senders: DashMap::new(),
            }),
        }
    }

    pub fn add_conn(&self, conn: ConnId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.senders.insert(conn, tx);
    }

    pub fn remove_conn(&self, conn: ConnId) {
        self.inner.senders.remove(&conn);
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalOutbound for SignalingService {
    fn send(&self, conn: ConnId, msg: ServerSignal) {
        let Some(sender) = self.inner.senders.get(&conn) else {
            // The peer may have dropped between the membership read and
            // this push; best-effort delivery, nothing to do.
            warn!(%conn, "attempted to signal a disconnected connection");
            return;
        };
        match serde_json::to_string(&msg) {
            Ok(json) => {
                if let Err(e) = sender.send(Message::Text(json.into())) {
                    error!(%conn, error = %e, "failed to queue outbound signal");
                }
            }
            Err(e) => error!(error = %e, "failed to serialize outbound signal"),
        }
    }

    fn close(&self, conn: ConnId) {
        if let Some(sender) = self.inner.senders.get(&conn) {
            let _ = sender.send(Message::Close(None));
        }
    }
}
