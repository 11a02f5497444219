//! Gateway configuration with validation.

use axum::http::HeaderName;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid identity header: {0}")]
    InvalidIdentityHeader(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// HTTP gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Header carrying the authenticated player id, set by upstream auth
    pub identity_header: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            request_timeout: Duration::from_secs(10),
            identity_header: "x-player-id".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.identity_header_name()?;
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Parsed identity header name.
    pub fn identity_header_name(&self) -> Result<HeaderName, ConfigError> {
        HeaderName::from_bytes(self.identity_header.trim().as_bytes())
            .map_err(|_| ConfigError::InvalidIdentityHeader(self.identity_header.clone()))
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
