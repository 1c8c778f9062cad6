//! Distance lookup models

use serde::{Deserialize, Serialize};

/// Distance and travel time between two places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceQuote {
    #[serde(alias = "origen")]
    pub origin: String,
    #[serde(alias = "destino")]
    pub destination: String,
    #[serde(alias = "distancia_km")]
    pub distance_km: f64,
    #[serde(alias = "duracion_horas")]
    pub duration_hours: f64,
    /// Present only when the value is the fallback estimate
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "nota")]
    pub note: Option<String>,
}

impl DistanceQuote {
    /// Whether this quote is an estimate rather than a table entry
    pub fn is_estimate(&self) -> bool {
        self.note.is_some()
    }
}

/// An origin/destination pair, as sent in batch lookups
///
/// Missing names deserialize as empty strings so one incomplete entry does
/// not reject the batch it arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPair {
    #[serde(default, alias = "origen")]
    pub origin: String,
    #[serde(default, alias = "destino")]
    pub destination: String,
}

impl CityPair {
    /// Whether both city names are present
    pub fn is_complete(&self) -> bool {
        !self.origin.trim().is_empty() && !self.destination.trim().is_empty()
    }
}
