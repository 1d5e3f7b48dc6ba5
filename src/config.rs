//! Configuration module for packwatch.
//!
//! Loads configuration from `config.toml` with environment variable overrides.

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub panel: PanelConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

/// Printer host (plugin backend) configuration
#[derive(Clone, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_host_url")]
    pub url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

// Custom Debug implementation to avoid exposing api_key
impl std::fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            url: default_host_url(),
            api_key: None,
            poll_interval_secs: default_poll_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

/// Panel display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_show_stats")]
    pub show_stats: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            show_stats: default_show_stats(),
        }
    }
}

fn default_show_stats() -> bool {
    true
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. `config.toml` in current directory (optional)
    /// 3. Environment variables with `PACKWATCH_` prefix
    ///
    /// Environment variables use double underscore for nesting:
    /// - `PACKWATCH_SERVER__PORT=9000` sets `server.port`
    /// - `PACKWATCH_HOST__URL=http://octopi.local` sets `host.url`
    pub fn load() -> Result<Self, AppError> {
        Self::load_from("config.toml")
    }

    /// Load configuration from a specific file path.
    pub fn load_from(config_path: &str) -> Result<Self, AppError> {
        let config = ConfigLoader::builder()
            // Start with defaults
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 5050)?
            .set_default("host.url", "http://127.0.0.1:5000")?
            .set_default("host.poll_interval_secs", 5)?
            .set_default("host.request_timeout_secs", 10)?
            .set_default("panel.show_stats", true)?
            // Add config file (optional)
            .add_source(File::with_name(config_path).required(false))
            // Override with environment variables
            // PACKWATCH_HOST__API_KEY=... -> host.api_key
            .add_source(
                Environment::with_prefix("PACKWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration for required fields.
    fn validate(&self) -> Result<(), AppError> {
        if self.host.api_key.is_none() {
            tracing::warn!("Host API key not configured - the printer host may reject status requests");
        }

        if self.host.poll_interval_secs == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "host.poll_interval_secs must be at least 1".to_string(),
            )));
        }

        Ok(())
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::{IpAddr, SocketAddr};
        let ip: IpAddr = self.server.bind.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid bind address '{}', using 0.0.0.0", self.server.bind);
            "0.0.0.0".parse().unwrap()
        });
        SocketAddr::new(ip, self.server.port)
    }
}
