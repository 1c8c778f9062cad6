//! Distance Lookup handlers

use axum::extract::{Query, State};
use axum::http::Method;
use axum::Json;
use fleet_client::Payload;
use fleet_core::CityPair;
use fleet_gateway::BatchQuote;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{forward, Passthrough};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Query parameters of `GET /api/distance`
#[derive(Debug, Deserialize)]
pub struct DistanceParams {
    #[serde(alias = "origen")]
    pub origin: Option<String>,
    #[serde(alias = "destino")]
    pub destination: Option<String>,
}

/// Body of `POST /api/distance/batch`
///
/// Entries stay untyped here so a malformed one fails on its own.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default, alias = "rutas")]
    pub routes: Option<Vec<Value>>,
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub data: Vec<BatchQuote>,
    pub timestamp: String,
}

/// GET /api/distance?origin=..&destination=..
pub async fn get_distance(
    State(state): State<AppState>,
    Query(params): Query<DistanceParams>,
) -> Result<Passthrough, ApiError> {
    let (origin, destination) = match (params.origin, params.destination) {
        (Some(o), Some(d)) if !o.is_empty() && !d.is_empty() => (o, d),
        _ => {
            return Err(ApiError::BadRequest(
                "query parameters origin and destination are required".to_string(),
            ))
        }
    };

    let query = vec![
        ("origin".to_string(), origin),
        ("destination".to_string(), destination),
    ];
    forward(
        &state,
        Method::GET,
        &state.services().distance,
        "/distance",
        Payload::Query(query),
    )
    .await
}

/// POST /api/distance/batch
///
/// Looks up every pair concurrently. Individual failures are reported per
/// entry; the response itself is always 200 once the body is valid.
pub async fn batch_distance(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let entries = match request.routes {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            return Err(ApiError::BadRequest(
                "a non-empty array of routes with origin and destination is required"
                    .to_string(),
            ))
        }
    };

    // Entries that are not pair objects become incomplete pairs
    let pairs: Vec<CityPair> = entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect();

    tracing::debug!(pairs = pairs.len(), "Batch distance lookup");
    let data = state.composer().quote_batch(&pairs).await;

    Ok(Json(BatchResponse {
        success: true,
        data,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
