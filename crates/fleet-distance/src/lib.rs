//! fleet-distance - Distance lookup between Ecuadorian cities
//!
//! A small backend answering `GET /distance?origin=..&destination=..` from an
//! in-memory table. City names are compared after normalization (case,
//! diacritics and surrounding whitespace are ignored) and pairs match in
//! both directions. Unknown pairs get a fixed estimate instead of an error.
//!
//! # Usage
//!
//! ```ignore
//! use fleet_distance::{create_router, DistanceTable};
//!
//! let router = create_router(DistanceTable::default());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3003").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod service;
pub mod table;

pub use service::{create_router, DistanceQuery};
pub use table::{
    normalize_city, DistanceTable, FALLBACK_DISTANCE_KM, FALLBACK_DURATION_HOURS, FALLBACK_NOTE,
};
