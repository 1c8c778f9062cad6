//! Composed route view

use axum::extract::State;
use axum::Json;
use fleet_core::EnrichedRoute;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/routes-completas
///
/// Every route with its unit and distance attached. Answers 200 whenever
/// the Route Registry answered, even if some or all distance lookups failed.
pub async fn list_composed_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrichedRoute>>, ApiError> {
    let routes = state.composer().compose().await?;
    Ok(Json(routes))
}
