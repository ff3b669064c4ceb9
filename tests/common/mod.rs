//! Shared helpers for router-level tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use products_api::{
    app, AppState, MemoryProductStore, NewProduct, Product, ProductRepository, ProductSummary, SortOrder, StoreError,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const FRONTEND: &str = "http://localhost:5173";

pub fn router_with(store: Arc<dyn ProductRepository>) -> Router {
    app(AppState::new(store), Some(FRONTEND))
}

pub fn memory_router() -> Router {
    router_with(Arc::new(MemoryProductStore::new()))
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a product through the API and return its id.
pub async fn create(router: &Router, body: Value) -> i64 {
    let (status, created) = send(router, Method::POST, "/api/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created["data"]["id"].as_i64().unwrap()
}

/// Memory store that counts every call made to it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryProductStore,
    calls: AtomicUsize,
    mutations: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductRepository for CountingStore {
    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        self.read();
        self.inner.find(id).await
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        self.write();
        self.inner.insert(product).await
    }

    async fn replace(&self, id: i64, product: NewProduct) -> Result<Option<Product>, StoreError> {
        self.write();
        self.inner.replace(id, product).await
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.write();
        self.inner.delete(id).await
    }

    async fn list(&self, order: SortOrder) -> Result<Vec<ProductSummary>, StoreError> {
        self.read();
        self.inner.list(order).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Store whose every call fails, as if the database were unreachable.
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

#[async_trait]
impl ProductRepository for FailingStore {
    async fn find(&self, _id: i64) -> Result<Option<Product>, StoreError> {
        Err(down())
    }

    async fn insert(&self, _product: NewProduct) -> Result<Product, StoreError> {
        Err(down())
    }

    async fn replace(&self, _id: i64, _product: NewProduct) -> Result<Option<Product>, StoreError> {
        Err(down())
    }

    async fn delete(&self, _id: i64) -> Result<bool, StoreError> {
        Err(down())
    }

    async fn list(&self, _order: SortOrder) -> Result<Vec<ProductSummary>, StoreError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}
