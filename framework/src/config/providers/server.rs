use crate::config::env::env;
use crate::error::FrameworkError;
use std::net::{IpAddr, SocketAddr};

/// Default request body limit: 1 MiB
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl ServerConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env("SERVER_HOST", "0.0.0.0".to_string()),
            port: env("SERVER_PORT", 8080),
            max_body_size: env("SERVER_MAX_BODY_SIZE", DEFAULT_MAX_BODY_SIZE),
        }
    }

    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Parse host and port into a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, FrameworkError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| FrameworkError::internal(format!("invalid SERVER_HOST '{}'", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Builder for ServerConfig; unset fields come from the environment
#[derive(Default)]
pub struct ServerConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    max_body_size: Option<usize>,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the maximum request body size in bytes
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = Some(size);
        self
    }

    pub fn build(self) -> ServerConfig {
        let default = ServerConfig::from_env();
        ServerConfig {
            host: self.host.unwrap_or(default.host),
            port: self.port.unwrap_or(default.port),
            max_body_size: self.max_body_size.unwrap_or(default.max_body_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_and_addr() {
        let config = ServerConfig::builder()
            .host("127.0.0.1")
            .port(9000)
            .max_body_size(16)
            .build();
        assert_eq!(config.max_body_size, 16);
        assert_eq!(
            config.socket_addr().ok(),
            Some(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        let config = ServerConfig::builder().host("not a host").build();
        let err = config.socket_addr().unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
