//! Route composition - merges routes with their distance lookups
//!
//! The composer fetches the route collection once, then issues one distance
//! lookup per route, all in flight at the same time. Lookups fail
//! independently: a failed lookup only blanks the distance fields of its own
//! route. Only a failure to fetch the routes themselves fails the whole
//! operation, since there is nothing to enrich without them.

use std::sync::Arc;

use fleet_core::{
    BackendCallResult, CityPair, DistanceQuote, DistanceSource, EnrichedRoute, RouteSource,
};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Builds the enriched route view from a route source and a distance source
#[derive(Clone)]
pub struct RouteComposer {
    routes: Arc<dyn RouteSource>,
    distances: Arc<dyn DistanceSource>,
}

impl RouteComposer {
    pub fn new(routes: Arc<dyn RouteSource>, distances: Arc<dyn DistanceSource>) -> Self {
        Self { routes, distances }
    }

    /// Fetch every route and attach its distance and duration.
    ///
    /// The output has the same length and order as the route collection,
    /// whatever order the lookups complete in. There is no concurrency cap:
    /// N routes mean N simultaneous lookups.
    pub async fn compose(&self) -> BackendCallResult<Vec<EnrichedRoute>> {
        let routes = self.routes.list_routes().await.inspect_err(|failure| {
            warn!(error = %failure, "Failed to fetch routes, cannot compose");
        })?;

        debug!(route_count = routes.len(), "Enriching routes with distances");

        // join_all never short-circuits and yields outcomes in input order
        let lookups = routes
            .iter()
            .map(|route| self.distances.quote(&route.origin, &route.destination));
        let outcomes = join_all(lookups).await;

        let mut failed = 0usize;
        let enriched: Vec<EnrichedRoute> = routes
            .into_iter()
            .zip(outcomes)
            .map(|(route, outcome)| match outcome {
                Ok(quote) => EnrichedRoute::compose(route, Some(&quote)),
                Err(failure) => {
                    failed += 1;
                    warn!(
                        route_id = route.id,
                        origin = %route.origin,
                        destination = %route.destination,
                        error = %failure,
                        "Distance lookup failed, leaving enrichment empty"
                    );
                    EnrichedRoute::compose(route, None)
                }
            })
            .collect();

        info!(
            route_count = enriched.len(),
            failed_lookups = failed,
            "Composed routes"
        );
        Ok(enriched)
    }

    /// Look up several city pairs at once.
    ///
    /// Each pair reports its own outcome; the batch itself never fails.
    /// Pairs missing a city name fail without a lookup.
    pub async fn quote_batch(&self, pairs: &[CityPair]) -> Vec<BatchQuote> {
        let lookups = pairs.iter().map(|pair| async move {
            if !pair.is_complete() {
                return BatchQuote::failed(pair, INCOMPLETE_PAIR.to_string());
            }
            match self.distances.quote(&pair.origin, &pair.destination).await {
                Ok(quote) => BatchQuote::found(quote),
                Err(failure) => BatchQuote::failed(pair, failure.to_string()),
            }
        });

        join_all(lookups).await
    }
}

const INCOMPLETE_PAIR: &str = "origin and destination are required";

/// Outcome of one entry of a batch distance lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchQuote {
    pub success: bool,
    pub origin: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchQuote {
    fn found(quote: DistanceQuote) -> Self {
        Self {
            success: true,
            origin: quote.origin,
            destination: quote.destination,
            distance_km: Some(quote.distance_km),
            duration_hours: Some(quote.duration_hours),
            note: quote.note,
            error: None,
        }
    }

    fn failed(pair: &CityPair, error: String) -> Self {
        Self {
            success: false,
            origin: pair.origin.clone(),
            destination: pair.destination.clone(),
            distance_km: None,
            duration_hours: None,
            note: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use fleet_core::{CallFailure, FailureKind, Route};
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Mock sources
    // =========================================================================

    struct MockRoutes {
        result: BackendCallResult<Vec<Route>>,
    }

    #[async_trait]
    impl RouteSource for MockRoutes {
        async fn list_routes(&self) -> BackendCallResult<Vec<Route>> {
            self.result.clone()
        }
    }

    enum Lookup {
        Found { km: f64, hours: f64, delay_ms: u64 },
        Fails(CallFailure),
    }

    /// Distance source answering from a fixed table, tracking concurrency
    #[derive(Default)]
    struct MockDistances {
        table: HashMap<(String, String), Lookup>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl MockDistances {
        fn with(mut self, origin: &str, destination: &str, lookup: Lookup) -> Self {
            self.table
                .insert((origin.to_string(), destination.to_string()), lookup);
            self
        }
    }

    #[async_trait]
    impl DistanceSource for MockDistances {
        async fn quote(
            &self,
            origin: &str,
            destination: &str,
        ) -> BackendCallResult<DistanceQuote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let result = match self.table.get(&(origin.to_string(), destination.to_string())) {
                Some(Lookup::Found {
                    km,
                    hours,
                    delay_ms,
                }) => {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                    Ok(DistanceQuote {
                        origin: origin.to_string(),
                        destination: destination.to_string(),
                        distance_km: *km,
                        duration_hours: *hours,
                        note: None,
                    })
                }
                Some(Lookup::Fails(failure)) => Err(failure.clone()),
                None => Err(CallFailure::unknown("no mock entry")),
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    fn route(id: i64, origin: &str, destination: &str) -> Route {
        Route {
            id,
            origin: origin.to_string(),
            destination: destination.to_string(),
            unit_id: id * 10,
            unit: None,
        }
    }

    fn composer(routes: BackendCallResult<Vec<Route>>, distances: MockDistances) -> RouteComposer {
        RouteComposer::new(Arc::new(MockRoutes { result: routes }), Arc::new(distances))
    }

    fn found(km: f64, hours: f64, delay_ms: u64) -> Lookup {
        Lookup::Found {
            km,
            hours,
            delay_ms,
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn test_single_route_enriched() {
        let distances = MockDistances::default().with("Machala", "Guayaquil", found(180.0, 2.5, 0));
        let composer = composer(Ok(vec![route(1, "Machala", "Guayaquil")]), distances);

        let enriched = composer.compose().await.unwrap();

        assert_eq!(
            enriched,
            vec![EnrichedRoute {
                id: 1,
                origin: "Machala".to_string(),
                destination: "Guayaquil".to_string(),
                unit_id: 10,
                unit: None,
                distance_km: Some(180.0),
                duration_hours: Some(2.5),
            }]
        );
    }

    #[tokio::test]
    async fn test_order_preserved_when_lookups_finish_out_of_order() {
        // First route answers last, last route answers first
        let distances = MockDistances::default()
            .with("Machala", "Quito", found(600.0, 8.0, 80))
            .with("Guayaquil", "Cuenca", found(243.0, 3.5, 40))
            .with("Quito", "Ambato", found(135.0, 2.0, 0));
        let composer = composer(
            Ok(vec![
                route(3, "Machala", "Quito"),
                route(1, "Guayaquil", "Cuenca"),
                route(2, "Quito", "Ambato"),
            ]),
            distances,
        );

        let enriched = composer.compose().await.unwrap();

        let ids: Vec<i64> = enriched.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        let kms: Vec<Option<f64>> = enriched.iter().map(|r| r.distance_km).collect();
        assert_eq!(kms, vec![Some(600.0), Some(243.0), Some(135.0)]);
    }

    #[tokio::test]
    async fn test_one_failed_lookup_only_blanks_its_route() {
        let distances = MockDistances::default()
            .with("Machala", "Guayaquil", found(180.0, 2.5, 0))
            .with(
                "Machala",
                "Loja",
                Lookup::Fails(CallFailure::timeout("no response within 5000 ms")),
            )
            .with("Cuenca", "Loja", found(210.0, 3.5, 0));
        let composer = composer(
            Ok(vec![
                route(1, "Machala", "Guayaquil"),
                route(2, "Machala", "Loja"),
                route(3, "Cuenca", "Loja"),
            ]),
            distances,
        );

        let enriched = composer.compose().await.unwrap();

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].distance_km, Some(180.0));
        assert_eq!(enriched[1].distance_km, None);
        assert_eq!(enriched[1].duration_hours, None);
        assert_eq!(enriched[1].origin, "Machala");
        assert_eq!(enriched[2].duration_hours, Some(3.5));
    }

    #[tokio::test]
    async fn test_all_lookups_failing_still_returns_every_route() {
        let distances = MockDistances::default();
        let composer = composer(
            Ok(vec![route(1, "A", "B"), route(2, "C", "D")]),
            distances,
        );

        let enriched = composer.compose().await.unwrap();

        assert_eq!(enriched.len(), 2);
        assert!(enriched.iter().all(|r| r.distance_km.is_none()));
    }

    #[tokio::test]
    async fn test_route_fetch_failure_fails_operation() {
        let distances = Arc::new(MockDistances::default());
        let composer = RouteComposer::new(
            Arc::new(MockRoutes {
                result: Err(CallFailure::connection_refused("connection refused")),
            }),
            distances.clone(),
        );

        let failure = composer.compose().await.unwrap_err();

        assert_eq!(failure.kind, FailureKind::ConnectionRefused);
        assert_eq!(distances.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_route_collection() {
        let composer = composer(Ok(vec![]), MockDistances::default());
        assert!(composer.compose().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookups_run_concurrently() {
        let distances = Arc::new(
            MockDistances::default()
                .with("A", "B", found(1.0, 1.0, 50))
                .with("C", "D", found(2.0, 1.0, 50))
                .with("E", "F", found(3.0, 1.0, 50))
                .with("G", "H", found(4.0, 1.0, 50)),
        );
        let composer = RouteComposer::new(
            Arc::new(MockRoutes {
                result: Ok(vec![
                    route(1, "A", "B"),
                    route(2, "C", "D"),
                    route(3, "E", "F"),
                    route(4, "G", "H"),
                ]),
            }),
            distances.clone(),
        );

        composer.compose().await.unwrap();

        assert_eq!(distances.calls.load(Ordering::SeqCst), 4);
        assert_eq!(distances.peak.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_repeated_compose_is_stable() {
        let distances = MockDistances::default()
            .with("Machala", "Guayaquil", found(180.0, 2.5, 0))
            .with("Quito", "Cuenca", found(497.0, 7.0, 0));
        let composer = composer(
            Ok(vec![
                route(1, "Machala", "Guayaquil"),
                route(2, "Quito", "Cuenca"),
            ]),
            distances,
        );

        let first = serde_json::to_string(&composer.compose().await.unwrap()).unwrap();
        let second = serde_json::to_string(&composer.compose().await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_batch_reports_each_pair() {
        let distances = MockDistances::default()
            .with("Machala", "Guayaquil", found(180.0, 2.5, 20))
            .with("X", "Y", Lookup::Fails(CallFailure::upstream(400, None, "bad")));
        let composer = composer(Ok(vec![]), distances);
        let pairs = vec![
            CityPair {
                origin: "Machala".to_string(),
                destination: "Guayaquil".to_string(),
            },
            CityPair {
                origin: "X".to_string(),
                destination: "Y".to_string(),
            },
        ];

        let results = composer.quote_batch(&pairs).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert_eq!(results[0].distance_km, Some(180.0));
        assert!(!results[1].success);
        assert_eq!(results[1].origin, "X");
        assert_eq!(results[1].error.as_deref(), Some("upstream_error(400): bad"));
    }

    #[tokio::test]
    async fn test_batch_incomplete_pair_fails_alone() {
        let distances =
            Arc::new(MockDistances::default().with("Machala", "Guayaquil", found(180.0, 2.5, 0)));
        let composer = RouteComposer::new(
            Arc::new(MockRoutes { result: Ok(vec![]) }),
            distances.clone(),
        );
        let pairs = vec![
            CityPair {
                origin: "Machala".to_string(),
                destination: "Guayaquil".to_string(),
            },
            CityPair {
                origin: "Quito".to_string(),
                destination: String::new(),
            },
        ];

        let results = composer.quote_batch(&pairs).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert_eq!(results[0].distance_km, Some(180.0));
        assert!(!results[1].success);
        assert_eq!(results[1].origin, "Quito");
        assert_eq!(results[1].error.as_deref(), Some(INCOMPLETE_PAIR));
        assert_eq!(distances.calls.load(Ordering::SeqCst), 1);
    }
}
