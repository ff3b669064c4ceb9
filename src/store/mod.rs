//! Resource Store: the `ProductRepository` seam and its implementations.
//!
//! Handlers only see `dyn ProductRepository`. `PgProductStore` is the PostgreSQL
//! implementation used by the binary; `MemoryProductStore` backs tests and local runs.
//!
//! No locking is done here. A toggle or full update is a `find` followed by a
//! `replace`, so two concurrent writers on the same id race and the last write wins.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::{connect_options, PgProductStore, PRODUCTS_TABLE};

use crate::error::StoreError;
use crate::model::{NewProduct, Product, ProductSummary, SortOrder};
use async_trait::async_trait;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch one product by id.
    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Insert a new product; the store assigns `id` and timestamps.
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Overwrite name, price and availability. Returns None if the row is gone.
    async fn replace(&self, id: i64, product: NewProduct) -> Result<Option<Product>, StoreError>;

    /// Permanently delete. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn list(&self, order: SortOrder) -> Result<Vec<ProductSummary>, StoreError>;

    /// Connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Startup connectivity check; logs the outcome either way.
pub async fn check_connection(store: &dyn ProductRepository) -> Result<(), StoreError> {
    match store.ping().await {
        Ok(()) => {
            tracing::info!("Conexion exitosa a la BD");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Hubo un error al conectar a la BD");
            Err(e)
        }
    }
}
