//! HTTP server configuration.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const BIND_ADDR_VAR: &str = "SHAREIT_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address could not be parsed as `host:port`.
    #[error("invalid {BIND_ADDR_VAR} value {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a configuration for a known socket address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read the configuration from the environment.
    ///
    /// `SHAREIT_BIND_ADDR` overrides the default `0.0.0.0:8080`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: raw,
                message: err.to_string(),
            })?;
        Ok(Self { bind_addr })
    }

    /// The socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_parses() {
        let config = ServerConfig::new(DEFAULT_BIND_ADDR.parse().expect("default parses"));
        assert_eq!(config.bind_addr().port(), 8080);
    }

    #[test]
    fn invalid_addr_is_reported_with_the_value() {
        let error = "not-an-addr"
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidBindAddr {
                value: "not-an-addr".to_owned(),
                message: err.to_string(),
            })
            .expect_err("invalid address");
        assert!(error.to_string().contains("not-an-addr"));
    }
}
