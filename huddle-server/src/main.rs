use axum::Router;
use axum::routing::get;
use huddle_server::signaling::{SignalingState, ws_handler};
use huddle_server::{
    JwtVerifier, MemoryRoomDirectory, ServerConfig, SignalingCoordinator, SignalingService,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;

    let service = SignalingService::new();
    let coordinator = Arc::new(SignalingCoordinator::new(
        Arc::new(MemoryRoomDirectory::new()),
        Arc::new(JwtVerifier::new(&config.jwt_secret)),
        Arc::new(service.clone()),
        config.ice_servers.clone(),
    ));

    let state = SignalingState {
        coordinator,
        service,
    };

    let app = Router::new()
        .route("/signal", get(ws_handler))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(CorsLayer::permissive());

    info!("signaling server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
