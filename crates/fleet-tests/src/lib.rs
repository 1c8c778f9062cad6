//! End-to-end tests for the fleet gateway
//!
//! Runs the whole system in-process: in-memory Unit and Route registries,
//! the real distance service and the gateway, each on its own ephemeral
//! port, talking real HTTP to each other.
//!
//! # Test Structure
//!
//! - `gateway_e2e_test.rs` - CRUD through the gateway, composed routes,
//!   failure mapping and health
//! - `config_test.rs` - gateway wiring from a TOML config file
//!
//! The library part holds the shared fixtures.

pub mod backends;
pub mod harness;

pub use backends::{route_registry, unit_registry, UnitStore};
pub use harness::{test_config, DistanceMode, Fleet, FleetOptions};
