//! Router assembly: product resource, operational routes, docs, and the HTTP layers around them.

mod common;
mod product;

pub use common::common_routes;
pub use product::product_routes;

use crate::openapi::docs_routes;
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const PRODUCTS_BASE_PATH: &str = "/api/products";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// CORS allowing only the configured frontend origin. Requests without `Origin` pass through untouched.
pub fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = frontend_url
        .and_then(|url| match url.trim_end_matches('/').parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(url, error = %e, "ignoring invalid FRONTEND_URL");
                None
            }
        })
        .into_iter()
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Full application: products under `/api/products`, health and docs at the root.
pub fn app(state: AppState, frontend_url: Option<&str>) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(PRODUCTS_BASE_PATH, product_routes(state))
        .merge(docs_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors_layer(frontend_url))
        .layer(TraceLayer::new_for_http())
}
