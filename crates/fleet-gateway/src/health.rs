//! Health aggregation across backends

use std::collections::BTreeMap;
use std::sync::Arc;

use fleet_core::{HealthProbe, HealthReport};
use futures::future::join_all;
use tracing::{info, warn};

/// Checks every registered backend and folds the outcomes into one report
#[derive(Clone)]
pub struct HealthAggregator {
    probe: Arc<dyn HealthProbe>,
    /// Backend name -> base URL
    backends: BTreeMap<String, String>,
}

impl HealthAggregator {
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            probe,
            backends: BTreeMap::new(),
        }
    }

    /// Register a backend under a name. Re-registering a name replaces its URL.
    pub fn register_backend(&mut self, name: impl Into<String>, base_url: impl Into<String>) {
        let name = name.into();
        let base_url = base_url.into();
        info!(backend = %name, base_url = %base_url, "Registered backend for health checks");
        self.backends.insert(name, base_url);
    }

    /// Builder form of [`register_backend`](Self::register_backend)
    pub fn with_backend(mut self, name: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.register_backend(name, base_url);
        self
    }

    pub fn backends(&self) -> &BTreeMap<String, String> {
        &self.backends
    }

    /// Probe every backend in parallel.
    ///
    /// Each probe is bounded by the probe's own timeout, so the whole check
    /// takes about as long as the slowest backend. Never fails.
    pub async fn check_all(&self) -> HealthReport {
        let probes = self
            .backends
            .iter()
            .map(|(name, base_url)| async move { (name.clone(), self.probe.probe(base_url).await) });

        let services: BTreeMap<_, _> = join_all(probes).await.into_iter().collect();
        let report = HealthReport::from_services(services);

        if report.overall_available {
            info!(backends = report.services.len(), "All backends healthy");
        } else {
            let down: Vec<&str> = report
                .services
                .iter()
                .filter(|(_, health)| !health.available)
                .map(|(name, _)| name.as_str())
                .collect();
            warn!(down = ?down, "Some backends are unavailable");
        }

        report
    }
}
