//! Products API: CRUD over product records with request validation, PostgreSQL storage and OpenAPI docs.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::{Config, Environment};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{NewProduct, Product, ProductSummary, SortColumn, SortOrder};
pub use openapi::ApiDoc;
pub use routes::{app, common_routes, cors_layer, product_routes, PRODUCTS_BASE_PATH};
pub use state::AppState;
pub use store::{check_connection, MemoryProductStore, PgProductStore, ProductRepository};
