//! Shared data models for the gateway and its backends

mod distance;
mod health;
mod route;
mod unit;

pub use distance::*;
pub use health::*;
pub use route::*;
pub use unit::*;
