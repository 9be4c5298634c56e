#![allow(clippy::unwrap_used)]
// Integration tests for `IpLookupProvider` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nearcare_locate::{IpLookupProvider, LocatePosition, LocationError};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(timeout: Duration) -> (MockServer, IpLookupProvider) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/json", server.uri())).unwrap();
    let http = reqwest::Client::builder().timeout(timeout).build().unwrap();
    let provider = IpLookupProvider::with_client(http, endpoint, timeout);
    (server, provider)
}

// ── Success path ────────────────────────────────────────────────────

#[tokio::test]
async fn resolves_position_from_success_body() {
    let (server, provider) = setup(Duration::from_secs(5)).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lat": 18.5204,
            "lon": 73.8567,
            "city": "Pune"
        })))
        .mount(&server)
        .await;

    let pos = provider.current_position().await.unwrap();

    assert!((pos.lat - 18.5204).abs() < 1e-9);
    assert!((pos.lng - 73.8567).abs() < 1e-9);
    assert!(pos.accuracy_km.is_some(), "IP lookups report an accuracy hint");
}

// ── Failure mapping ─────────────────────────────────────────────────

#[tokio::test]
async fn fail_status_maps_to_unavailable_with_message() {
    let (server, provider) = setup(Duration::from_secs(5)).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&server)
        .await;

    let err = provider.current_position().await.unwrap_err();

    assert_eq!(
        err,
        LocationError::Unavailable {
            message: "private range".into()
        }
    );
}

#[tokio::test]
async fn http_403_maps_to_permission_denied() {
    let (server, provider) = setup(Duration::from_secs(5)).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let err = provider.current_position().await.unwrap_err();
    assert_eq!(err, LocationError::PermissionDenied);
}

#[tokio::test]
async fn http_500_maps_to_unavailable() {
    let (server, provider) = setup(Duration::from_secs(5)).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = provider.current_position().await.unwrap_err();
    assert!(
        matches!(err, LocationError::Unavailable { .. }),
        "expected Unavailable, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_maps_to_unavailable() {
    let (server, provider) = setup(Duration::from_secs(5)).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider.current_position().await.unwrap_err();
    assert!(
        matches!(err, LocationError::Unavailable { .. }),
        "expected Unavailable, got: {err:?}"
    );
}

#[tokio::test]
async fn missing_coordinates_maps_to_unavailable() {
    let (server, provider) = setup(Duration::from_secs(5)).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success"
        })))
        .mount(&server)
        .await;

    let err = provider.current_position().await.unwrap_err();
    assert!(
        matches!(err, LocationError::Unavailable { .. }),
        "expected Unavailable, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let (server, provider) = setup(Duration::from_millis(100)).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "status": "success", "lat": 0.0, "lon": 0.0 })),
        )
        .mount(&server)
        .await;

    let err = provider.current_position().await.unwrap_err();
    assert!(
        matches!(err, LocationError::Timeout { .. }),
        "expected Timeout, got: {err:?}"
    );
}
