//! Source traits - the seams the aggregation layer is written against
//!
//! The gateway never talks to a concrete HTTP client directly. It is handed
//! implementations of these traits: the HTTP-backed ones live in
//! `fleet-client`, tests use in-memory mocks.

use async_trait::async_trait;

use crate::error::BackendCallResult;
use crate::models::{DistanceQuote, Route, ServiceHealth};

/// Provides the full route collection
#[async_trait]
pub trait RouteSource: Send + Sync {
    /// Fetch every route, in registry order
    async fn list_routes(&self) -> BackendCallResult<Vec<Route>>;
}

/// Provides distance quotes between two places
#[async_trait]
pub trait DistanceSource: Send + Sync {
    /// Look up the distance between `origin` and `destination`
    async fn quote(&self, origin: &str, destination: &str) -> BackendCallResult<DistanceQuote>;
}

/// Checks liveness of a backend
///
/// Implementations never fail: an unreachable or erroring backend is
/// reported as `available = false`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, base_url: &str) -> ServiceHealth;
}
