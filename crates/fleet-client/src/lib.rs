//! Fleet backend client
//!
//! Provides the [`BackendClient`] the gateway uses to call the Unit Registry,
//! Route Registry and Distance Lookup services. Every call is bounded by a
//! timeout and ends in a [`BackendCallResult`]: transport errors are
//! classified into the closed [`FailureKind`] set and never escape as
//! `reqwest` errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use fleet_client::{BackendClient, ClientConfig, Payload};
//! use reqwest::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::new(ClientConfig::default())?;
//!
//!     match client
//!         .call(Method::GET, "http://localhost:3002", "/routes", Payload::None)
//!         .await
//!     {
//!         Ok(response) => println!("{}", response.body),
//!         Err(failure) => eprintln!("routes unavailable: {}", failure),
//!     }
//!
//!     let health = client.health_check("http://localhost:3003").await;
//!     println!("distance available: {}", health.available);
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module starts in-process axum servers to stand in for
//! backends:
//!
//! ```rust,ignore
//! use fleet_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! let routes = server.client.call(Method::GET, &server.base_url(), "/routes", Payload::None).await;
//! ```

mod client;
mod error;
mod observer;
mod registry;
pub mod testing;

pub use client::{BackendClient, BackendResponse, ClientConfig, Payload};
pub use error::{ClientError, Result};
pub use observer::{CallObserver, CallOutcome, CallRecord, TracingObserver};
pub use registry::{DistanceLookupClient, RouteRegistryClient};

// Re-export core types for convenience
pub use fleet_core::{BackendCallResult, CallFailure, FailureKind, ServiceHealth};
