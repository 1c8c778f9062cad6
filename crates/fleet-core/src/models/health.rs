//! Backend health models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Liveness of a single backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub available: bool,
    /// Payload returned by the backend's health endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Why the backend is considered unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    pub fn up(status: Value) -> Self {
        Self {
            available: true,
            status: Some(status),
            error: None,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            available: false,
            status: None,
            error: Some(error.into()),
        }
    }
}

/// Combined health of every backend the gateway depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// True only when every backend is available
    pub overall_available: bool,
    pub services: BTreeMap<String, ServiceHealth>,
}

impl HealthReport {
    pub fn from_services(services: BTreeMap<String, ServiceHealth>) -> Self {
        let overall_available = services.values().all(|s| s.available);
        Self {
            overall_available,
            services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(flags: &[(&str, bool)]) -> HealthReport {
        let services = flags
            .iter()
            .map(|(name, up)| {
                let health = if *up {
                    ServiceHealth::up(json!("OK"))
                } else {
                    ServiceHealth::down("connection refused")
                };
                (name.to_string(), health)
            })
            .collect();
        HealthReport::from_services(services)
    }

    #[test]
    fn all_up_is_available() {
        assert!(report(&[("units", true), ("routes", true), ("distance", true)]).overall_available);
    }

    #[test]
    fn any_down_flips_aggregate() {
        for down in ["units", "routes", "distance"] {
            let flags: Vec<(&str, bool)> = ["units", "routes", "distance"]
                .iter()
                .map(|name| (*name, *name != down))
                .collect();
            assert!(!report(&flags).overall_available, "{} down", down);
        }
    }

    #[test]
    fn serialization_skips_absent_detail() {
        let up = serde_json::to_value(ServiceHealth::up(json!({"status": "ok"}))).unwrap();
        assert_eq!(up, json!({"available": true, "status": {"status": "ok"}}));

        let down = serde_json::to_value(ServiceHealth::down("timeout")).unwrap();
        assert_eq!(down, json!({"available": false, "error": "timeout"}));
    }
}
