//! fleet-core - Core traits and types for the fleet gateway
//!
//! This crate provides the shared vocabulary between the gateway and the
//! backend services it talks to: the data model (units, routes, distance
//! quotes, health), the closed failure taxonomy every backend call is
//! reduced to, and the source traits the aggregation layer is written
//! against.

pub mod error;
pub mod models;
pub mod source;

pub use error::{classify, BackendCallResult, CallFailure, FailureKind, TransportFault};
pub use models::*;
pub use source::{DistanceSource, HealthProbe, RouteSource};
