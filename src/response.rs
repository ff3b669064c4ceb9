//! Standard response envelope helpers.

use crate::model::{Product, ProductSummary};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Message returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Producto Eliminado";

#[derive(Serialize, ToSchema)]
pub struct ProductData {
    pub data: Product,
}

#[derive(Serialize, ToSchema)]
pub struct ProductListData {
    pub data: Vec<ProductSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageData {
    #[schema(example = "Producto Eliminado")]
    pub data: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorMessage {
    #[schema(example = "Producto no encontrado")]
    pub error: String,
}

pub fn success_one(data: Product) -> (StatusCode, Json<ProductData>) {
    (StatusCode::CREATED, Json(ProductData { data }))
}

pub fn success_one_ok(data: Product) -> (StatusCode, Json<ProductData>) {
    (StatusCode::OK, Json(ProductData { data }))
}

pub fn success_many(data: Vec<ProductSummary>) -> (StatusCode, Json<ProductListData>) {
    (StatusCode::OK, Json(ProductListData { data }))
}

pub fn success_message(message: &str) -> (StatusCode, Json<MessageData>) {
    (
        StatusCode::OK,
        Json(MessageData {
            data: message.to_string(),
        }),
    )
}
