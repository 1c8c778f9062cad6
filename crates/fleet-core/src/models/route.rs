//! Route models

use serde::{Deserialize, Serialize};

use super::{DistanceQuote, Unit};

/// A route as stored by the Route Registry
///
/// `unit_id` is not enforced across services. The registry embeds the
/// referenced unit on reads when it can resolve it, and leaves `unit` null
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    #[serde(alias = "origen")]
    pub origin: String,
    #[serde(alias = "destino")]
    pub destination: String,
    #[serde(alias = "unidad_id")]
    pub unit_id: i64,
    #[serde(default, alias = "unidad")]
    pub unit: Option<Unit>,
}

/// A route merged with the data the gateway attaches at read time.
///
/// Never persisted. Enrichment fields are always serialized, as `null` when
/// the backend that provides them could not be reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRoute {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub unit_id: i64,
    pub unit: Option<Unit>,
    pub distance_km: Option<f64>,
    pub duration_hours: Option<f64>,
}

impl EnrichedRoute {
    /// Merge a route with the outcome of its distance lookup
    pub fn compose(route: Route, distance: Option<&DistanceQuote>) -> Self {
        Self {
            id: route.id,
            origin: route.origin,
            destination: route.destination,
            unit_id: route.unit_id,
            unit: route.unit,
            distance_km: distance.map(|d| d.distance_km),
            duration_hours: distance.map(|d| d.duration_hours),
        }
    }
}
