//! HTTP tests for the distance service

use fleet_client::testing::TestServer;
use fleet_client::{FailureKind, Payload};
use fleet_distance::{create_router, DistanceTable, FALLBACK_NOTE};
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;

async fn start() -> TestServer {
    TestServer::start(create_router(DistanceTable::default()))
        .await
        .unwrap()
}

fn query(origin: &str, destination: &str) -> Payload {
    Payload::Query(vec![
        ("origin".to_string(), origin.to_string()),
        ("destination".to_string(), destination.to_string()),
    ])
}

#[tokio::test]
async fn test_known_pair_over_http() {
    let server = start().await;

    let response = server
        .client
        .call(
            Method::GET,
            &server.base_url(),
            "/distance",
            query("Machala", "Guayaquil"),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({
            "origin": "Machala",
            "destination": "Guayaquil",
            "distance_km": 180.0,
            "duration_hours": 2.5
        })
    );
}

#[tokio::test]
async fn test_reverse_and_accented_pair() {
    let server = start().await;

    let response = server
        .client
        .call(
            Method::GET,
            &server.base_url(),
            "/distance",
            query("CUENCA ", "Machalá"),
        )
        .await
        .unwrap();

    assert_eq!(response.body["distance_km"], json!(195.0));
    assert_eq!(response.body["duration_hours"], json!(3.0));
    assert!(response.body.get("note").is_none());
}

#[tokio::test]
async fn test_unknown_pair_is_estimate() {
    let server = start().await;

    let response = server
        .client
        .call(
            Method::GET,
            &server.base_url(),
            "/distance",
            query("Quito", "Galápagos"),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["distance_km"], json!(100.0));
    assert_eq!(response.body["duration_hours"], json!(1.5));
    assert_eq!(response.body["note"], json!(FALLBACK_NOTE));
}

#[tokio::test]
async fn test_spanish_parameter_names() {
    let server = start().await;

    let response = server
        .client
        .call(
            Method::GET,
            &server.base_url(),
            "/distance",
            Payload::Query(vec![
                ("origen".to_string(), "Quito".to_string()),
                ("destino".to_string(), "Ambato".to_string()),
            ]),
        )
        .await
        .unwrap();

    assert_eq!(response.body["distance_km"], json!(135.0));
}

#[tokio::test]
async fn test_missing_parameter_is_bad_request() {
    let server = start().await;

    let failure = server
        .client
        .call(
            Method::GET,
            &server.base_url(),
            "/distance",
            Payload::Query(vec![("origin".to_string(), "Quito".to_string())]),
        )
        .await
        .unwrap_err();

    match failure.kind {
        FailureKind::Upstream { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body.unwrap()["error"], json!("bad_request"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_and_index() {
    let server = start().await;

    let health = server.client.health_check(&server.base_url()).await;
    assert!(health.available);

    let index = server
        .client
        .call(Method::GET, &server.base_url(), "/", Payload::None)
        .await
        .unwrap();
    assert!(index.body["example"].as_str().unwrap().starts_with("/distance"));
}
