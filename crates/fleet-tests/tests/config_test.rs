//! Gateway wired from a TOML config file

use std::io::Write;

use fleet_api::{create_router, AppState, GatewayConfig};
use fleet_client::testing::TestServer;
use fleet_distance::DistanceTable;
use fleet_tests::{route_registry, unit_registry, UnitStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_gateway_from_config_file() {
    let units = UnitStore::default();
    let unit_server = TestServer::start(unit_registry(units.clone())).await.unwrap();
    let route_server = TestServer::start(route_registry(units.clone())).await.unwrap();
    let distance_server = TestServer::start(fleet_distance::create_router(DistanceTable::default()))
        .await
        .unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
environment = "staging"

[server]
port = 18080
cors_origins = ["http://localhost:4200"]

[services]
units = "{}"
routes = "{}"
distance = "{}"

[timeouts]
request_ms = 1000
health_ms = 500
"#,
        unit_server.base_url(),
        route_server.base_url(),
        distance_server.base_url()
    )
    .unwrap();

    let config = GatewayConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.server.port, 18080);
    assert_eq!(config.timeouts.health_ms, 500);

    let gateway = TestServer::start(create_router(AppState::new(config).unwrap()))
        .await
        .unwrap();
    let http = reqwest::Client::new();

    let health: Value = http
        .get(format!("{}/health", gateway.base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["environment"], json!("staging"));

    let info: Value = http
        .get(format!("{}/health/info", gateway.base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info["services"]["routes"], json!(route_server.base_url()));

    let response = http
        .get(format!("{}/health/services", gateway.base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let mut config = fleet_tests::test_config();
    config.server.cors_origins = vec!["http://localhost:4200".to_string()];
    let gateway = TestServer::start(create_router(AppState::new(config).unwrap()))
        .await
        .unwrap();

    let response = reqwest::Client::new()
        .get(format!("{}/health", gateway.base_url()))
        .header("Origin", "http://localhost:4200")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:4200")
    );

    let response = reqwest::Client::new()
        .get(format!("{}/health", gateway.base_url()))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
