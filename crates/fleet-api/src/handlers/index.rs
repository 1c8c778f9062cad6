//! Gateway index and fallback handlers

use std::collections::BTreeMap;

use axum::http::{Method, Uri};
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
pub struct IndexResponse {
    pub success: bool,
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub timestamp: String,
}

/// Public endpoints, keyed by a short name
pub(crate) fn endpoints() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("health", "/health"),
        ("info", "/health/info"),
        ("services_status", "/health/services"),
        ("units", "/api/units"),
        ("routes", "/api/routes"),
        ("routes_composed", "/api/routes-completas"),
        ("distance", "/api/distance"),
        ("distance_batch", "/api/distance/batch"),
    ])
}

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        success: true,
        message: "Fleet API Gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: endpoints(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Any path no other route matched
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} {} not found", method, uri))
}
