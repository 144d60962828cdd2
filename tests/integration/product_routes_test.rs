//! Tests for the product REST endpoints mounted on the mock database

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use product_config_harness::{
    models::sample_product_payload, router::build_router, startup::initialize_app, Config,
};

/// Create test router
fn create_test_router() -> Router {
    let app_state = initialize_app(&Config::default()).expect("mock wiring");
    build_router(app_state)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = create_test_router().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-id", "tester")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "mock");
}

#[tokio::test]
async fn test_get_product_returns_full_configuration() {
    let (status, body) = send(
        Request::builder()
            .uri("/api/products/abc-123")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let config = &body["data"];
    assert_eq!(config["product"]["id"], "abc-123");
    assert_eq!(config["product"]["product_id"], "TEST001");
    assert_eq!(config["product"]["standard_weight"], json!(185));
    assert!(config["product"]["standard_weight"].is_u64());
    assert_eq!(config["customVariables"][0]["value"], 100);

    let section = &config["sections"][0]["section"];
    assert_eq!(section["section_name"], "Quality Control");
    assert_eq!(section["icon"], "fas fa-weight");
    assert_eq!(section["tables"][0]["headers"], json!(["Time", "Value"]));
    assert_eq!(section["metadata"]["layout"], "grid");
}

#[tokio::test]
async fn test_create_product_returns_created_configuration() {
    let payload = serde_json::to_value(sample_product_payload()).unwrap();
    let (status, body) = send(json_request("POST", "/api/products", &payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["product"]["id"], "uuid-123");
    assert_eq!(body["data"]["sections"][0]["parameters"][0]["parameter_id"], "param_1");
}

#[tokio::test]
async fn test_create_product_rejects_invalid_payload() {
    let mut payload = serde_json::to_value(sample_product_payload()).unwrap();
    payload["name"] = json!("");
    payload["sections"][0]["section_id"] = json!("");

    let (status, body) = send(json_request("POST", "/api/products", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_3001");
    let details = body["error"]["details"].as_str().unwrap();
    assert!(details.contains("name"));
}

#[tokio::test]
async fn test_create_product_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_3003");
}

#[tokio::test]
async fn test_update_product_returns_configuration_for_path_id() {
    let update = json!({
        "name": "Renamed Product",
        "standard_weight": 190,
        "customVariables": [{ "name": "mixingTime", "value": 45 }]
    });
    let (status, body) = send(json_request("PUT", "/api/products/p-42", &update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["product"]["id"], "p-42");
}

#[tokio::test]
async fn test_update_product_rejects_negative_weight() {
    let update = json!({ "standard_weight": -1 });
    let (status, _) = send(json_request("PUT", "/api/products/p-42", &update)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_product_echoes_id() {
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/products/p-7")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "p-7");
    assert_eq!(body["message"], "Product deleted");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .uri("/api/products/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_error_body_request_id_matches_header() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("content-type", "application/json")
        .body(Body::from("{"))
        .unwrap();

    let response = create_test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["request_id"], header.as_str());
}

#[tokio::test]
async fn test_openapi_document_lists_product_paths() {
    let (status, body) = send(
        Request::builder()
            .uri("/api/docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/products/{id}"].is_object());
    assert!(body["paths"]["/api/products"]["post"].is_object());
}
