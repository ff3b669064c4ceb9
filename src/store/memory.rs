//! In-memory product store. Ids come from a counter and are never reused.

use super::ProductRepository;
use crate::error::StoreError;
use crate::model::{NewProduct, Product, ProductSummary, SortColumn, SortOrder};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: Mutex<Table>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, Table>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("product table lock poisoned".into()))
    }
}

fn compare(a: &Product, b: &Product, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Price => a.price.total_cmp(&b.price),
    }
}

#[async_trait]
impl ProductRepository for MemoryProductStore {
    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.table()?.rows.get(&id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut table = self.table()?;
        table.last_id += 1;
        let now = Utc::now();
        let row = Product {
            id: table.last_id,
            name: product.name,
            price: product.price,
            availability: product.availability,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn replace(&self, id: i64, product: NewProduct) -> Result<Option<Product>, StoreError> {
        let mut table = self.table()?;
        Ok(table.rows.get_mut(&id).map(|row| {
            row.name = product.name;
            row.price = product.price;
            row.availability = product.availability;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table()?.rows.remove(&id).is_some())
    }

    async fn list(&self, order: SortOrder) -> Result<Vec<ProductSummary>, StoreError> {
        let table = self.table()?;
        let mut rows: Vec<&Product> = table.rows.values().collect();
        rows.sort_by(|a, b| {
            let primary = compare(a, b, order.column);
            let primary = if order.descending { primary.reverse() } else { primary };
            primary.then(a.id.cmp(&b.id))
        });
        Ok(rows.into_iter().cloned().map(ProductSummary::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.table().map(|_| ())
    }
}
