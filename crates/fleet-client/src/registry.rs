//! Typed clients for the backends the aggregation layer reads from

use async_trait::async_trait;
use fleet_core::{BackendCallResult, DistanceQuote, DistanceSource, Route, RouteSource};
use reqwest::Method;

use crate::client::{BackendClient, Payload};

/// Route Registry over HTTP (`GET /routes`)
#[derive(Debug, Clone)]
pub struct RouteRegistryClient {
    client: BackendClient,
    base_url: String,
}

impl RouteRegistryClient {
    pub fn new(client: BackendClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RouteSource for RouteRegistryClient {
    async fn list_routes(&self) -> BackendCallResult<Vec<Route>> {
        self.client
            .call_json(Method::GET, &self.base_url, "/routes", Payload::None)
            .await
    }
}

/// Distance Lookup over HTTP (`GET /distance?origin=&destination=`)
#[derive(Debug, Clone)]
pub struct DistanceLookupClient {
    client: BackendClient,
    base_url: String,
}

impl DistanceLookupClient {
    pub fn new(client: BackendClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DistanceSource for DistanceLookupClient {
    async fn quote(&self, origin: &str, destination: &str) -> BackendCallResult<DistanceQuote> {
        let query = vec![
            ("origin".to_string(), origin.to_string()),
            ("destination".to_string(), destination.to_string()),
        ];
        self.client
            .call_json(Method::GET, &self.base_url, "/distance", Payload::Query(query))
            .await
    }
}
