use huddle_core::IceServerConfig;

/// Public STUN entry handed to clients when no ICE servers are
/// configured.
const DEFAULT_STUN_URL: &str = "stun:stun.l.google.com:19302";

/// Environment-driven server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub ice_servers: Vec<IceServerConfig>,
}

impl ServerConfig {
    /// Read configuration from the environment. `HUDDLE_JWT_SECRET` is
    /// required; everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("HUDDLE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let jwt_secret = std::env::var("HUDDLE_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("HUDDLE_JWT_SECRET is not set"))?;

        let ice_servers = match std::env::var("HUDDLE_ICE_URLS") {
            Ok(urls) => vec![IceServerConfig {
                urls: urls.split(',').map(|s| s.trim().to_string()).collect(),
                username: std::env::var("HUDDLE_ICE_USERNAME").ok(),
                credential: std::env::var("HUDDLE_ICE_CREDENTIAL").ok(),
            }],
            Err(_) => vec![IceServerConfig {
                urls: vec![DEFAULT_STUN_URL.to_string()],
                username: None,
                credential: None,
            }],
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            ice_servers,
        })
    }
}
