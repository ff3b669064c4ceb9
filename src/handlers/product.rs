//! Product handlers: each validates its request, then makes one store lookup and at most one mutation.

use crate::error::AppError;
use crate::model::{NewProduct, SortColumn, SortOrder};
use crate::openapi::ProductBody;
use crate::response::{
    success_many, success_message, success_one, success_one_ok, ErrorMessage, MessageData, ProductData,
    ProductListData, DELETED_MESSAGE,
};
use crate::state::AppState;
use crate::validation::{validate_create, validate_id, validate_update, ValidationErrorBody};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// A body that is missing or not JSON validates as empty; one that cannot be read is refused.
fn body_or_null(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection @ JsonRejection::BytesRejection(_)) => Err(AppError::Body(rejection)),
        Err(rejection) => {
            tracing::debug!(%rejection, "unparseable JSON body");
            Ok(Value::Null)
        }
    }
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductBody,
    responses(
        (status = 201, description = "Product created successfully", body = ProductData),
        (status = 400, description = "Bad Request - invalid input", body = ValidationErrorBody),
        (status = 413, description = "Body too large", body = ErrorMessage),
        (status = 500, description = "Store failure", body = ErrorMessage),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let new_product = validate_create(&body_or_null(body)?)?;
    let product = state.store.insert(new_product).await?;
    tracing::info!(id = product.id, "product created");
    Ok(success_one(product))
}

/// Get a list of products, most expensive first
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Successful response", body = ProductListData),
        (status = 500, description = "Store failure", body = ErrorMessage),
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.store.list(SortOrder::desc(SortColumn::Price)).await?;
    Ok(success_many(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = ProductData),
        (status = 400, description = "Bad Request - Invalid ID", body = ValidationErrorBody),
        (status = 404, description = "Not found", body = ErrorMessage),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validate_id(&id)?;
    let product = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    Ok(success_one_ok(product))
}

/// Replace name, price and availability of a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    request_body = ProductBody,
    responses(
        (status = 200, description = "Successful response", body = ProductData),
        (status = 400, description = "Bad Request - Invalid ID or invalid input", body = ValidationErrorBody),
        (status = 404, description = "Not found", body = ErrorMessage),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (id, fields) = validate_update(&id, &body_or_null(body)?)?;
    state.store.find(id).await?.ok_or(AppError::NotFound)?;
    let product = state.store.replace(id, fields).await?.ok_or(AppError::NotFound)?;
    Ok(success_one_ok(product))
}

/// Flip the availability of a product. Any request body is ignored.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    responses(
        (status = 200, description = "Successful response", body = ProductData),
        (status = 400, description = "Bad Request - Invalid ID", body = ValidationErrorBody),
        (status = 404, description = "Not found", body = ErrorMessage),
    )
)]
pub async fn update_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validate_id(&id)?;
    let current = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    let flipped = NewProduct {
        availability: !current.availability,
        ..NewProduct::from(&current)
    };
    let product = state.store.replace(id, flipped).await?.ok_or(AppError::NotFound)?;
    Ok(success_one_ok(product))
}

/// Delete a product permanently
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Successful response", body = MessageData),
        (status = 400, description = "Bad Request - Invalid ID", body = ValidationErrorBody),
        (status = 404, description = "Not found", body = ErrorMessage),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validate_id(&id)?;
    state.store.find(id).await?.ok_or(AppError::NotFound)?;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(id, "product deleted");
    Ok(success_message(DELETED_MESSAGE))
}
