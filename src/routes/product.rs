//! Product routes. Mounted under `/api/products`; `:id` is the only path parameter.

use crate::handlers::product::{
    create_product, delete_product, get_product, list_products, update_availability, update_product,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(update_availability)
                .delete(delete_product),
        )
        .with_state(state)
}
