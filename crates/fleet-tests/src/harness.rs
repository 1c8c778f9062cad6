//! A complete in-process fleet: three backends and the gateway

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use fleet_api::{create_router, AppState, GatewayConfig};
use fleet_client::testing::{unreachable_base_url, TestServer};
use fleet_client::{CallObserver, Result};
use fleet_distance::DistanceTable;
use serde_json::Value;

use crate::backends::{route_registry, unit_registry, UnitStore};

/// How the distance backend behaves
#[derive(Debug, Clone, Copy, Default)]
pub enum DistanceMode {
    /// Answer immediately
    #[default]
    Normal,
    /// Delay every answer
    Slow(Duration),
    /// Not running at all
    Down,
}

/// Options for starting a [`Fleet`]
#[derive(Clone, Default)]
pub struct FleetOptions {
    pub distance: DistanceMode,
    /// Leave the route registry unstarted
    pub routes_down: bool,
    /// Gateway configuration; service URLs are filled in by the harness
    pub config: Option<GatewayConfig>,
    pub observer: Option<Arc<dyn CallObserver>>,
}

/// Running fleet. Every server stops when this is dropped.
pub struct Fleet {
    pub gateway: TestServer,
    pub units: UnitStore,
    pub config: GatewayConfig,
    _backends: Vec<TestServer>,
    http: reqwest::Client,
}

/// Fast timeouts so failure tests finish quickly
pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.timeouts.request_ms = 400;
    config.timeouts.health_ms = 200;
    config.environment = "test".to_string();
    config
}

fn slow_distance(delay: Duration) -> Router {
    fleet_distance::create_router(DistanceTable::default()).layer(middleware::from_fn(
        move |request: Request, next: Next| async move {
            tokio::time::sleep(delay).await;
            next.run(request).await
        },
    ))
}

impl Fleet {
    pub async fn start() -> Result<Self> {
        Self::start_with(FleetOptions::default()).await
    }

    pub async fn start_with(options: FleetOptions) -> Result<Self> {
        let mut backends = Vec::new();
        let mut config = options.config.unwrap_or_else(test_config);
        let units = UnitStore::default();

        let unit_server = TestServer::start(unit_registry(units.clone())).await?;
        config.services.units = unit_server.base_url();
        backends.push(unit_server);

        if options.routes_down {
            config.services.routes = unreachable_base_url().await?;
        } else {
            let server = TestServer::start(route_registry(units.clone())).await?;
            config.services.routes = server.base_url();
            backends.push(server);
        }

        let distance_router = match options.distance {
            DistanceMode::Normal => Some(fleet_distance::create_router(DistanceTable::default())),
            DistanceMode::Slow(delay) => Some(slow_distance(delay)),
            DistanceMode::Down => None,
        };
        match distance_router {
            Some(router) => {
                let server = TestServer::start(router).await?;
                config.services.distance = server.base_url();
                backends.push(server);
            }
            None => {
                config.services.distance = unreachable_base_url().await?;
            }
        }

        let state = match options.observer {
            Some(observer) => AppState::with_observer(config.clone(), observer),
            None => AppState::new(config.clone()),
        }?;
        let gateway = TestServer::start(create_router(state)).await?;

        Ok(Self {
            gateway,
            units,
            config,
            _backends: backends,
            http: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.gateway.base_url(), path)
    }

    /// GET a gateway path, returning status and JSON body (null if none)
    pub async fn get(&self, path: &str) -> Result<(u16, Value)> {
        let response = self.http.get(self.url(path)).send().await?;
        Ok(Self::read(response).await)
    }

    /// Send a JSON body to a gateway path
    pub async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Value,
    ) -> Result<(u16, Value)> {
        let response = self
            .http
            .request(method, self.url(path))
            .json(&body)
            .send()
            .await?;
        Ok(Self::read(response).await)
    }

    async fn read(response: reqwest::Response) -> (u16, Value) {
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}
