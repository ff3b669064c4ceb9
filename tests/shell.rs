mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{memory_router, router_with, send, send_request, FailingStore, FRONTEND};
use products_api::{check_connection, MemoryProductStore};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn health_and_readiness() {
    let router = memory_router();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));

    let (status, body) = send(&router_with(Arc::new(FailingStore)), Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "degraded", "database": "unavailable"}));
}

#[tokio::test]
async fn version_reports_package() {
    let (status, body) = send(&memory_router(), Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "products-api");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let router = memory_router();
    let (status, doc) = send(&router, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert!(doc["paths"]["/api/products/{id}"]["patch"].is_object());
    assert_eq!(doc["tags"][0]["name"], "Products");

    let request = Request::builder().uri("/docs/").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"), "{content_type}");
}

#[tokio::test]
async fn cors_allows_only_the_frontend_origin() {
    let router = memory_router();
    let request = |origin: &str| {
        Request::builder()
            .method(Method::GET)
            .uri("/api/products")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    };

    let response = router.clone().oneshot(request(FRONTEND)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN].to_str().unwrap(),
        FRONTEND
    );

    let response = router.clone().oneshot(request("http://evil.example")).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

    let no_origin = Request::builder().uri("/api/products").body(Body::empty()).unwrap();
    let (status, _) = send_request(&router, no_origin).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_bodies_are_refused() {
    let router = memory_router();
    let name = "x".repeat(200 * 1024);
    let body = json!({"name": name, "price": 1}).to_string();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn oversized_streamed_bodies_are_refused() {
    let router = memory_router();
    let chunks: Vec<Result<String, std::io::Error>> = std::iter::once(Ok(r#"{"name":""#.to_string()))
        .chain((0..200).map(|_| Ok("x".repeat(1024))))
        .chain(std::iter::once(Ok(r#"","price":1}"#.to_string())))
        .collect();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from_stream(futures_util::stream::iter(chunks)))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn startup_check_reports_store_outcome() {
    assert!(check_connection(&MemoryProductStore::new()).await.is_ok());
    assert!(check_connection(&FailingStore).await.is_err());
}
