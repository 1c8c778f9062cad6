//! fleetd - Fleet Gateway Daemon
//!
//! Single HTTP entry point in front of the unit, route and distance
//! services.
//!
//! Usage:
//!   fleetd [OPTIONS] [config.toml]
//!
//! Settings are resolved in order: built-in defaults, then the optional
//! TOML file, then command-line flags and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fleet_api::{create_router, AppState, GatewayConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human readable lines (default)
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Parser)]
#[command(name = "fleetd")]
#[command(author, version, about = "Fleet API Gateway daemon")]
struct Args {
    /// Gateway config file (TOML)
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Base URL of the Unit Registry
    #[arg(long, env = "MS_UNITS_URL")]
    units_url: Option<String>,

    /// Base URL of the Route Registry
    #[arg(long, env = "MS_ROUTES_URL")]
    routes_url: Option<String>,

    /// Base URL of the Distance Lookup service
    #[arg(long, env = "MS_DISTANCE_URL")]
    distance_url: Option<String>,

    /// Timeout for backend calls, in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,

    /// Timeout for backend health checks, in milliseconds
    #[arg(long, env = "HEALTH_TIMEOUT")]
    health_timeout: Option<u64>,

    /// Deployment environment reported by /health
    #[arg(long, env = "FLEET_ENV")]
    environment: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

impl Args {
    /// Build the effective configuration
    fn resolve(&self) -> anyhow::Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GatewayConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Overlay flags and environment variables on a loaded configuration
    fn apply(&self, config: &mut GatewayConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.units_url {
            config.services.units = url.clone();
        }
        if let Some(url) = &self.routes_url {
            config.services.routes = url.clone();
        }
        if let Some(url) = &self.distance_url {
            config.services.distance = url.clone();
        }
        if let Some(ms) = self.request_timeout {
            config.timeouts.request_ms = ms;
        }
        if let Some(ms) = self.health_timeout {
            config.timeouts.health_ms = ms;
        }
        if let Some(env) = &self.environment {
            config.environment = env.clone();
        }
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "fleetd=info,fleet_api=info,fleet_gateway=info,fleet_client=info,tower_http=info".into()
    });

    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_format);

    tracing::info!("Starting fleetd (Fleet Gateway Daemon)");

    let config = args.resolve()?;
    tracing::info!(
        units = %config.services.units,
        routes = %config.services.routes,
        distance = %config.services.distance,
        request_timeout_ms = config.timeouts.request_ms,
        health_timeout_ms = config.timeouts.health_ms,
        environment = %config.environment,
        "Backends configured"
    );

    let port = config.server.port;
    let state = AppState::new(config).context("Failed to create backend client")?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("fleetd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_flags_keeps_defaults() {
        let args = Args::try_parse_from(["fleetd"]).unwrap();
        let mut config = GatewayConfig::default();
        args.apply(&mut config);
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "fleetd",
            "--port",
            "9000",
            "--distance-url",
            "http://distance:3003",
            "--request-timeout",
            "750",
            "--environment",
            "staging",
        ])
        .unwrap();
        let mut config = GatewayConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.services.distance, "http://distance:3003");
        assert_eq!(config.services.units, "http://localhost:3001");
        assert_eq!(config.timeouts.request_ms, 750);
        assert_eq!(config.timeouts.health_ms, 2000);
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn test_flags_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7000\n[services]\nunits = \"http://units:1\"").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let args = Args::try_parse_from(["fleetd", path.as_str(), "--port", "7001"]).unwrap();
        let config = args.resolve().unwrap();

        assert_eq!(config.server.port, 7001);
        assert_eq!(config.services.units, "http://units:1");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let args = Args::try_parse_from(["fleetd", "/nonexistent/fleet.toml"]).unwrap();
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_log_format_flag() {
        let args = Args::try_parse_from(["fleetd", "--log-format", "json"]).unwrap();
        assert_eq!(args.log_format, LogFormat::Json);
    }
}
