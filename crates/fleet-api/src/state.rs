//! Application state for the gateway API

use std::sync::Arc;
use std::time::{Duration, Instant};

use fleet_client::{
    BackendClient, CallObserver, DistanceLookupClient, Result as ClientResult,
    RouteRegistryClient,
};
use fleet_gateway::{HealthAggregator, RouteComposer};

use crate::config::{GatewayConfig, ServicesConfig};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared backend client (one connection pool for every backend)
    client: BackendClient,
    config: Arc<GatewayConfig>,
    composer: RouteComposer,
    health: Arc<HealthAggregator>,
    started_at: Instant,
}

impl AppState {
    /// Create state whose backend calls are logged through `tracing`
    pub fn new(config: GatewayConfig) -> ClientResult<Self> {
        let client = BackendClient::new(config.client_config())?;
        Ok(Self::with_client(config, client))
    }

    /// Create state whose backend calls are reported to `observer`
    pub fn with_observer(
        config: GatewayConfig,
        observer: Arc<dyn CallObserver>,
    ) -> ClientResult<Self> {
        let client = BackendClient::with_observer(config.client_config(), observer)?;
        Ok(Self::with_client(config, client))
    }

    /// Create state around an existing client
    pub fn with_client(config: GatewayConfig, client: BackendClient) -> Self {
        let services = &config.services;

        let composer = RouteComposer::new(
            Arc::new(RouteRegistryClient::new(client.clone(), &services.routes)),
            Arc::new(DistanceLookupClient::new(client.clone(), &services.distance)),
        );

        let health = HealthAggregator::new(Arc::new(client.clone()))
            .with_backend("units", &services.units)
            .with_backend("routes", &services.routes)
            .with_backend("distance", &services.distance);

        Self {
            client,
            config: Arc::new(config),
            composer,
            health: Arc::new(health),
            started_at: Instant::now(),
        }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Backend base URLs
    pub fn services(&self) -> &ServicesConfig {
        &self.config.services
    }

    pub fn composer(&self) -> &RouteComposer {
        &self.composer
    }

    pub fn health(&self) -> &HealthAggregator {
        &self.health
    }

    /// Time since the state was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
