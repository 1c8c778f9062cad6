//! Unit Registry passthrough handlers

use axum::extract::State;
use axum::http::Method;
use fleet_client::Payload;
use serde_json::Value;

use super::{forward, Passthrough};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /api/units
pub async fn list_units(State(state): State<AppState>) -> Result<Passthrough, ApiError> {
    forward(&state, Method::GET, &state.services().units, "/units", Payload::None).await
}

/// GET /api/units/{id}
pub async fn get_unit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Passthrough, ApiError> {
    let path = format!("/units/{}", id);
    forward(&state, Method::GET, &state.services().units, &path, Payload::None).await
}

/// POST /api/units
pub async fn create_unit(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Passthrough, ApiError> {
    forward(
        &state,
        Method::POST,
        &state.services().units,
        "/units",
        Payload::Json(body),
    )
    .await
}

/// PUT /api/units/{id}
pub async fn update_unit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Passthrough, ApiError> {
    let path = format!("/units/{}", id);
    forward(
        &state,
        Method::PUT,
        &state.services().units,
        &path,
        Payload::Json(body),
    )
    .await
}

/// DELETE /api/units/{id}
pub async fn delete_unit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Passthrough, ApiError> {
    let path = format!("/units/{}", id);
    forward(&state, Method::DELETE, &state.services().units, &path, Payload::None).await
}
