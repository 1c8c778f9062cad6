//! Route Registry passthrough handlers
//!
//! Creating a route whose unit does not exist is rejected by the registry
//! with a 404, which reaches the caller unchanged.

use axum::extract::State;
use axum::http::Method;
use fleet_client::Payload;
use serde_json::Value;

use super::{forward, Passthrough};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /api/routes
pub async fn list_routes(State(state): State<AppState>) -> Result<Passthrough, ApiError> {
    forward(&state, Method::GET, &state.services().routes, "/routes", Payload::None).await
}

/// GET /api/routes/{id}
pub async fn get_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Passthrough, ApiError> {
    let path = format!("/routes/{}", id);
    forward(&state, Method::GET, &state.services().routes, &path, Payload::None).await
}

/// POST /api/routes
pub async fn create_route(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Passthrough, ApiError> {
    forward(
        &state,
        Method::POST,
        &state.services().routes,
        "/routes",
        Payload::Json(body),
    )
    .await
}

/// PUT /api/routes/{id}
pub async fn update_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Passthrough, ApiError> {
    let path = format!("/routes/{}", id);
    forward(
        &state,
        Method::PUT,
        &state.services().routes,
        &path,
        Payload::Json(body),
    )
    .await
}

/// DELETE /api/routes/{id}
pub async fn delete_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Passthrough, ApiError> {
    let path = format!("/routes/{}", id);
    forward(&state, Method::DELETE, &state.services().routes, &path, Payload::None).await
}
