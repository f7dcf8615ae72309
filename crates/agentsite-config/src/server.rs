//! API server settings.

use std::net::SocketAddr;

use crate::{ConfigError, ConfigResult};

/// Listen settings for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl ServerConfig {
    /// Read `AGENTSITE_BIND_ADDR`, defaulting to `0.0.0.0:3000`.
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var("AGENTSITE_BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map(|bind| Self { bind })
                .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                    field: "AGENTSITE_BIND_ADDR".to_string(),
                    message: e.to_string(),
                }),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}
