//! fleet-api - REST API layer of the fleet gateway
//!
//! Exposes the unit, route and distance backends behind one HTTP surface,
//! plus the composed route view and health endpoints. Passthrough endpoints
//! relay the backend's JSON body and 2xx status unchanged; backend failures
//! are mapped to gateway error responses by [`ApiError`].
//!
//! # Usage
//!
//! ```ignore
//! use fleet_api::{create_router, AppState, GatewayConfig};
//!
//! let state = AppState::new(GatewayConfig::default())?;
//! let router = create_router(state);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use config::{ConfigError, GatewayConfig, ServerConfig, ServicesConfig, TimeoutConfig};
pub use error::ApiError;
pub use state::AppState;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the gateway router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server.cors_origins);

    Router::new()
        // Index and health
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::gateway_health))
        .route("/health/services", get(handlers::health::services_health))
        .route("/health/info", get(handlers::health::info))
        // Unit Registry
        .route(
            "/api/units",
            get(handlers::units::list_units).post(handlers::units::create_unit),
        )
        .route(
            "/api/units/{id}",
            get(handlers::units::get_unit)
                .put(handlers::units::update_unit)
                .delete(handlers::units::delete_unit),
        )
        // Route Registry
        .route(
            "/api/routes",
            get(handlers::routes::list_routes).post(handlers::routes::create_route),
        )
        .route(
            "/api/routes/{id}",
            get(handlers::routes::get_route)
                .put(handlers::routes::update_route)
                .delete(handlers::routes::delete_route),
        )
        // Composed view
        .route(
            "/api/routes-completas",
            get(handlers::composed::list_composed_routes),
        )
        // Distance Lookup
        .route("/api/distance", get(handlers::distance::get_distance))
        .route(
            "/api/distance/batch",
            post(handlers::distance::batch_distance),
        )
        .fallback(handlers::index::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured origins. `"*"` allows any origin without
/// credentials; an explicit list allows credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(AppState::new(GatewayConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/trucks?x=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({"error": "not_found", "message": "Route DELETE /api/trucks?x=1 not found"})
        );
    }

    #[tokio::test]
    async fn test_cors_preflight_for_frontend_origin() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/units")
                    .header("Origin", "http://localhost:4200")
                    .header("Access-Control-Request-Method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:4200"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }

    #[test]
    fn test_wildcard_origin() {
        // Must not panic: wildcard origins never combine with credentials
        let _ = cors_layer(&["*".to_string()]);
    }
}
