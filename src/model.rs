//! Product records as stored and as returned to clients.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A stored product. Keys are camelCase on the wire (`createdAt`, `updatedAt`).
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by the store on creation; never reused.
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Monitor Curvo de 49 pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product as listed: store timestamps are left out.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ProductSummary {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Monitor Curvo de 49 pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        ProductSummary {
            id: p.id,
            name: p.name,
            price: p.price,
            availability: p.availability,
        }
    }
}

/// Mutable fields of a product, already validated (`price > 0`, non-empty name).
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl From<&Product> for NewProduct {
    fn from(p: &Product) -> Self {
        NewProduct {
            name: p.name.clone(),
            price: p.price,
            availability: p.availability,
        }
    }
}

/// Sortable product columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
    Price,
}

impl SortColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::Price => "price",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub descending: bool,
}

impl SortOrder {
    pub fn asc(column: SortColumn) -> Self {
        SortOrder {
            column,
            descending: false,
        }
    }

    pub fn desc(column: SortColumn) -> Self {
        SortOrder {
            column,
            descending: true,
        }
    }
}
