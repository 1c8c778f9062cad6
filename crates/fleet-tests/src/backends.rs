//! In-memory Unit and Route registries
//!
//! Behave like the real registries as far as the gateway can tell: the
//! route registry embeds the referenced unit on reads (null when it no
//! longer exists) and rejects new routes whose unit is missing with a 404.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fleet_core::{Route, Unit};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// =============================================================================
// Unit Registry
// =============================================================================

#[derive(Debug, Deserialize)]
struct NewUnit {
    #[serde(alias = "placa")]
    plate: String,
    #[serde(alias = "chofer")]
    driver: String,
    #[serde(alias = "capacidad")]
    capacity: i64,
}

#[derive(Default)]
struct UnitTable {
    units: Vec<Unit>,
    next_id: i64,
}

/// Shared unit storage; the route registry reads it to embed units
#[derive(Clone, Default)]
pub struct UnitStore {
    inner: Arc<Mutex<UnitTable>>,
}

impl UnitStore {
    /// Insert a unit and return it with its assigned id
    pub fn insert(&self, plate: &str, driver: &str, capacity: i64) -> Unit {
        let mut table = self.inner.lock();
        table.next_id += 1;
        let unit = Unit {
            id: table.next_id,
            plate: plate.to_string(),
            driver: driver.to_string(),
            capacity,
        };
        table.units.push(unit.clone());
        unit
    }

    pub fn get(&self, id: i64) -> Option<Unit> {
        self.inner.lock().units.iter().find(|u| u.id == id).cloned()
    }

    pub fn remove(&self, id: i64) -> bool {
        let mut table = self.inner.lock();
        let before = table.units.len();
        table.units.retain(|u| u.id != id);
        table.units.len() != before
    }

    pub fn list(&self) -> Vec<Unit> {
        self.inner.lock().units.clone()
    }
}

/// Router of the Unit Registry
pub fn unit_registry(store: UnitStore) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok", "service": "units"})) }))
        .route("/units", get(list_units).post(create_unit))
        .route(
            "/units/{id}",
            get(get_unit).put(update_unit).delete(delete_unit),
        )
        .with_state(store)
}

async fn list_units(State(store): State<UnitStore>) -> Json<Vec<Unit>> {
    Json(store.list())
}

async fn get_unit(State(store): State<UnitStore>, Path(id): Path<i64>) -> Response {
    match store.get(id) {
        Some(unit) => Json(unit).into_response(),
        None => error(StatusCode::NOT_FOUND, "Unit not found"),
    }
}

async fn create_unit(State(store): State<UnitStore>, Json(body): Json<Value>) -> Response {
    let Ok(new) = serde_json::from_value::<NewUnit>(body) else {
        return error(StatusCode::BAD_REQUEST, "plate, driver and capacity are required");
    };
    if store.list().iter().any(|u| u.plate == new.plate) {
        return error(StatusCode::BAD_REQUEST, "plate already registered");
    }
    let unit = store.insert(&new.plate, &new.driver, new.capacity);
    (StatusCode::CREATED, Json(unit)).into_response()
}

async fn update_unit(
    State(store): State<UnitStore>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let Ok(new) = serde_json::from_value::<NewUnit>(body) else {
        return error(StatusCode::BAD_REQUEST, "plate, driver and capacity are required");
    };
    let mut table = store.inner.lock();
    match table.units.iter_mut().find(|u| u.id == id) {
        Some(unit) => {
            unit.plate = new.plate;
            unit.driver = new.driver;
            unit.capacity = new.capacity;
            Json(unit.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Unit not found"),
    }
}

async fn delete_unit(State(store): State<UnitStore>, Path(id): Path<i64>) -> Response {
    if store.remove(id) {
        Json(json!({"message": "Unit deleted"})).into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Unit not found")
    }
}

// =============================================================================
// Route Registry
// =============================================================================

#[derive(Debug, Deserialize)]
struct NewRoute {
    #[serde(alias = "origen")]
    origin: String,
    #[serde(alias = "destino")]
    destination: String,
    #[serde(alias = "unidad_id")]
    unit_id: i64,
}

#[derive(Default)]
struct RouteTable {
    routes: Vec<Route>,
    next_id: i64,
}

#[derive(Clone)]
struct RouteRegistryState {
    routes: Arc<Mutex<RouteTable>>,
    units: UnitStore,
}

impl RouteRegistryState {
    /// Stored route with its unit resolved, or null when the unit is gone
    fn resolve(&self, route: &Route) -> Route {
        Route {
            unit: self.units.get(route.unit_id),
            ..route.clone()
        }
    }
}

/// Router of the Route Registry, resolving units from `units`
pub fn route_registry(units: UnitStore) -> Router {
    let state = RouteRegistryState {
        routes: Arc::new(Mutex::new(RouteTable::default())),
        units,
    };

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/routes", get(list_routes).post(create_route))
        .route(
            "/routes/{id}",
            get(get_route).put(update_route).delete(delete_route),
        )
        .with_state(state)
}

async fn list_routes(State(state): State<RouteRegistryState>) -> Json<Vec<Route>> {
    let stored = state.routes.lock().routes.clone();
    Json(stored.iter().map(|r| state.resolve(r)).collect())
}

async fn get_route(State(state): State<RouteRegistryState>, Path(id): Path<i64>) -> Response {
    let stored = state
        .routes
        .lock()
        .routes
        .iter()
        .find(|r| r.id == id)
        .cloned();
    match stored {
        Some(route) => Json(state.resolve(&route)).into_response(),
        None => error(StatusCode::NOT_FOUND, "Route not found"),
    }
}

async fn create_route(State(state): State<RouteRegistryState>, Json(body): Json<Value>) -> Response {
    let Ok(new) = serde_json::from_value::<NewRoute>(body) else {
        return error(StatusCode::BAD_REQUEST, "origin, destination and unit_id are required");
    };
    if state.units.get(new.unit_id).is_none() {
        return error(StatusCode::NOT_FOUND, "The referenced unit does not exist");
    }

    let mut table = state.routes.lock();
    table.next_id += 1;
    let route = Route {
        id: table.next_id,
        origin: new.origin,
        destination: new.destination,
        unit_id: new.unit_id,
        unit: None,
    };
    table.routes.push(route.clone());
    (StatusCode::CREATED, Json(route)).into_response()
}

async fn update_route(
    State(state): State<RouteRegistryState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let Ok(new) = serde_json::from_value::<NewRoute>(body) else {
        return error(StatusCode::BAD_REQUEST, "origin, destination and unit_id are required");
    };
    let mut table = state.routes.lock();
    match table.routes.iter_mut().find(|r| r.id == id) {
        Some(route) => {
            route.origin = new.origin;
            route.destination = new.destination;
            route.unit_id = new.unit_id;
            Json(route.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Route not found"),
    }
}

async fn delete_route(State(state): State<RouteRegistryState>, Path(id): Path<i64>) -> Response {
    let mut table = state.routes.lock();
    let before = table.routes.len();
    table.routes.retain(|r| r.id != id);
    if table.routes.len() != before {
        Json(json!({"message": "Route deleted"})).into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Route not found")
    }
}
