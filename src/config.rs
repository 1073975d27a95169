use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port. No default: this comes from the `PORT` environment
    /// variable and a missing or invalid value is a startup failure.
    pub port: u16,

    /// Request timeout in seconds, enforced as a transport-level deadline
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Grace period in seconds for draining in-flight requests on shutdown
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: 8080,
            timeout_secs: default_timeout_secs(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files.
    /// `PORT` selects the bind port; `LOG_LEVEL`, `TIMEOUT_SECS` and the
    /// rest map the same way. An optional `palindrome.*` file may supply
    /// any of the fields, with the environment taking precedence.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("palindrome").required(false))
            .add_source(config::Environment::default().try_parsing(true));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get shutdown grace period as Duration
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_shutdown_grace_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.shutdown_grace_secs, 30);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_port_is_required() {
        // PORT is mandatory; deserializing a config without it must fail.
        let result: Result<ServerConfig, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
