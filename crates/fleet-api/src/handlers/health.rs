//! Gateway and backend health handlers

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fleet_core::ServiceHealth;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct GatewayHealthResponse {
    pub success: bool,
    pub service: String,
    pub status: String,
    pub timestamp: String,
    pub uptime_seconds: f64,
    pub environment: String,
}

#[derive(Serialize)]
pub struct ServicesHealthResponse {
    pub success: bool,
    pub gateway: String,
    pub services: BTreeMap<String, ServiceHealth>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct InfoResponse {
    pub success: bool,
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub services: BTreeMap<&'static str, String>,
    pub timestamp: String,
}

/// GET /health
///
/// Liveness of the gateway itself; does not contact any backend.
pub async fn gateway_health(State(state): State<AppState>) -> Json<GatewayHealthResponse> {
    Json(GatewayHealthResponse {
        success: true,
        service: "fleet-gateway".to_string(),
        status: "running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: state.uptime().as_secs_f64(),
        environment: state.config().environment.clone(),
    })
}

/// GET /health/services
///
/// 200 when every backend is available, 503 otherwise.
pub async fn services_health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ServicesHealthResponse>) {
    let report = state.health().check_all().await;
    let status = if report.overall_available {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ServicesHealthResponse {
            success: report.overall_available,
            gateway: "running".to_string(),
            services: report.services,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}

/// GET /health/info
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    let services = state.services();
    Json(InfoResponse {
        success: true,
        name: "Fleet Route Management - API Gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Single entry point for the unit, route and distance services".to_string(),
        endpoints: super::index::endpoints(),
        services: BTreeMap::from([
            ("units", services.units.clone()),
            ("routes", services.routes.clone()),
            ("distance", services.distance.clone()),
        ]),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
