//! HTTP handlers for the gateway API

pub mod composed;
pub mod distance;
pub mod health;
pub mod index;
pub mod routes;
pub mod units;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fleet_client::{BackendResponse, Payload};

use crate::error::ApiError;
use crate::state::AppState;

/// A backend response relayed to the caller as-is
pub struct Passthrough(pub BackendResponse);

impl IntoResponse for Passthrough {
    fn into_response(self) -> Response {
        let BackendResponse { status, body } = self.0;
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
        if body.is_null() {
            status.into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}

/// Forward one request to a backend and relay its answer
pub(crate) async fn forward(
    state: &AppState,
    method: Method,
    base_url: &str,
    path: &str,
    payload: Payload,
) -> Result<Passthrough, ApiError> {
    let response = state.client().call(method, base_url, path, payload).await?;
    Ok(Passthrough(response))
}
