//! Integration tests for `/health`, `/` and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health reports whether a worker is configured
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_without_worker() {
    let app = common::build_test_app(None);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "Image Generation API");
    assert!(json["version"].is_string());
    assert_eq!(json["worker_configured"], false);
}

#[tokio::test]
async fn health_check_with_worker() {
    let app = common::build_test_app(Some("http://worker.internal".into()));
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["worker_configured"], true);
}

// ---------------------------------------------------------------------------
// Test: GET / describes the API surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_describes_endpoints_and_setup() {
    let app = common::build_test_app(None);
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["worker_configured"], false);
    assert_eq!(json["worker_url"], "Not configured");
    assert_eq!(json["endpoints"]["/generate"]["parameters"]["prompt"]["required"], true);
    assert_eq!(json["endpoints"]["/generate"]["parameters"]["seed"]["default"], -1);
    assert!(json["setup_instructions"].is_object());
}

#[tokio::test]
async fn index_shows_configured_worker_url() {
    let app = common::build_test_app(Some("http://worker.internal/".into()));
    let json = body_json(get(app, "/").await).await;

    assert_eq!(json["worker_url"], "http://worker.internal");
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(None);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(None);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight allows any origin by default
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = common::build_test_app(None);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/generate")
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header");
    assert_eq!(allow_origin, "*");
}
