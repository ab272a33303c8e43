use crate::signaling::{SignalingCoordinator, SignalingService};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientSignal, ConnId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Shared state for the signaling route.
#[derive(Clone)]
pub struct SignalingState {
    pub coordinator: Arc<SignalingCoordinator>,
    pub service: SignalingService,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SignalingState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SignalingState) {
    let conn = ConnId::new();
    info!(%conn, "new signaling connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.service.add_conn(conn, tx);
    state.coordinator.on_open(conn);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let coordinator = state.coordinator.clone();
        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientSignal>(&text) {
                        Ok(signal) => {
                            // Each connection handles its events strictly
                            // in arrival order; false means forced close.
                            if !coordinator.handle_signal(conn, signal).await {
                                break;
                            }
                        }
                        Err(e) => warn!(%conn, error = %e, "invalid signal frame"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Reconciliation runs after the receive loop has fully stopped, so a
    // join decided mid-disconnect cannot leave a phantom occupancy entry.
    state.coordinator.on_close(conn).await;
    state.service.remove_conn(conn);
    info!(%conn, "signaling connection closed");
}
