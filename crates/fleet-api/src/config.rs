//! Gateway configuration
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! gateway wired to the three backends on localhost.

use std::path::Path;
use std::time::Duration;

use fleet_client::ClientConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Top-level gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Free-form deployment label reported by `/health`
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            services: ServicesConfig::default(),
            timeouts: TimeoutConfig::default(),
            environment: default_environment(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Base URLs of the backends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_units_url")]
    pub units: String,
    #[serde(default = "default_routes_url")]
    pub routes: String,
    #[serde(default = "default_distance_url")]
    pub distance: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            units: default_units_url(),
            routes: default_routes_url(),
            distance: default_distance_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Budget for regular backend calls, in milliseconds
    #[serde(default = "default_request_ms")]
    pub request_ms: u64,
    /// Budget for health checks, in milliseconds
    #[serde(default = "default_health_ms")]
    pub health_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_ms: default_request_ms(),
            health_ms: default_health_ms(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:4200".to_string(),
        "http://localhost:8080".to_string(),
    ]
}

fn default_units_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_routes_url() -> String {
    "http://localhost:3002".to_string()
}

fn default_distance_url() -> String {
    "http://localhost:3003".to_string()
}

fn default_request_ms() -> u64 {
    5_000
}

fn default_health_ms() -> u64 {
    2_000
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Timeouts for the backend client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_millis(self.timeouts.request_ms),
            health_timeout: Duration::from_millis(self.timeouts.health_ms),
        }
    }
}
