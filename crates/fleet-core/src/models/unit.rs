//! Vehicle unit models

use serde::{Deserialize, Serialize};

/// A vehicle unit, owned by the Unit Registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    /// License plate (unique within the registry)
    #[serde(alias = "placa")]
    pub plate: String,
    #[serde(alias = "chofer")]
    pub driver: String,
    /// Passenger capacity
    #[serde(alias = "capacidad")]
    pub capacity: i64,
}
