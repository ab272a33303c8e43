mod coordinator;
mod outbound;
mod service;
mod ws_handler;

pub use coordinator::SignalingCoordinator;
pub use outbound::SignalOutbound;
pub use service::SignalingService;
pub use ws_handler::{SignalingState, ws_handler};
