//! HTTP surface of the distance service

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::table::DistanceTable;

/// Query parameters of `GET /distance`
#[derive(Debug, Default, Deserialize)]
pub struct DistanceQuery {
    #[serde(alias = "origen")]
    pub origin: Option<String>,
    #[serde(alias = "destino")]
    pub destination: Option<String>,
}

impl DistanceQuery {
    /// Both names, if present and non-empty
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.origin.as_deref(), self.destination.as_deref()) {
            (Some(o), Some(d)) if !o.is_empty() && !d.is_empty() => Some((o, d)),
            _ => None,
        }
    }
}

/// Create the distance service router
pub fn create_router(table: DistanceTable) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/distance", get(lookup))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(table))
}

async fn lookup(
    State(table): State<Arc<DistanceTable>>,
    Query(query): Query<DistanceQuery>,
) -> Response {
    let Some((origin, destination)) = query.pair() else {
        debug!("Distance lookup without origin/destination");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "bad_request",
                "message": "query parameters \"origin\" and \"destination\" are required"
            })),
        )
            .into_response();
    };

    let quote = table.lookup(origin, destination);
    debug!(
        origin,
        destination,
        distance_km = quote.distance_km,
        estimate = quote.is_estimate(),
        "Distance lookup"
    );
    Json(quote).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "fleet-distance" }))
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "fleet-distance running",
        "example": "/distance?origin=Machala&destination=Guayaquil"
    }))
}
