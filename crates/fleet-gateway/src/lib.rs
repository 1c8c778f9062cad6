//! fleet-gateway - Aggregation layer of the fleet API gateway
//!
//! This crate holds the parts of the gateway that talk to more than one
//! backend at a time:
//!
//! - [`RouteComposer`] builds the denormalized "routes with distance and
//!   unit" view by fanning out one distance lookup per route.
//! - [`HealthAggregator`] checks every registered backend in parallel and
//!   folds the results into one report.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Fleet Gateway                           │
//! │                                                                  │
//! │  ┌───────────────────────────┐    ┌───────────────────────────┐  │
//! │  │       RouteComposer       │    │     HealthAggregator      │  │
//! │  │  1 route list, N lookups  │    │  1 probe per backend      │  │
//! │  └─────┬──────────────┬──────┘    └─────────────┬─────────────┘  │
//! │        │              │                         │                │
//! │        ▼              ▼                         ▼                │
//! │  ┌───────────┐  ┌────────────┐   ┌───────┬──────────┬─────────┐  │
//! │  │RouteSource│  │DistanceSrc │   │ units │  routes  │distance │  │
//! │  └───────────┘  └────────────┘   └───────┴──────────┴─────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_client::{BackendClient, ClientConfig, DistanceLookupClient, RouteRegistryClient};
//! use fleet_gateway::{HealthAggregator, RouteComposer};
//!
//! let client = BackendClient::new(ClientConfig::default())?;
//! let composer = RouteComposer::new(
//!     Arc::new(RouteRegistryClient::new(client.clone(), "http://localhost:3002")),
//!     Arc::new(DistanceLookupClient::new(client.clone(), "http://localhost:3003")),
//! );
//! let routes = composer.compose().await?;
//!
//! let mut health = HealthAggregator::new(Arc::new(client));
//! health.register_backend("routes", "http://localhost:3002");
//! let report = health.check_all().await;
//! ```

mod composer;
mod health;

pub use composer::{BatchQuote, RouteComposer};
pub use health::HealthAggregator;

// Re-export core types for convenience
pub use fleet_core::{
    BackendCallResult, CallFailure, DistanceSource, EnrichedRoute, HealthProbe, HealthReport,
    RouteSource,
};
