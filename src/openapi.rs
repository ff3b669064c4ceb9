//! OpenAPI document for the product API: JSON at `/api-docs/openapi.json`, Swagger UI at `/docs`.

use crate::handlers::product;
use crate::model::{Product, ProductSummary};
use crate::response::{ErrorMessage, MessageData, ProductData, ProductListData};
use crate::validation::{FieldError, Location, ValidationErrorBody};
use axum::Router;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/docs";

/// Request body for create and full update. `availability` is optional on create.
#[derive(Debug, ToSchema)]
pub struct ProductBody {
    #[schema(example = "Monitor Curvo de 49 pulgadas")]
    pub name: String,
    #[schema(example = 399)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Rust / Axum / PostgreSQL",
        version = "1.0.0",
        description = "API Docs for Products"
    ),
    paths(
        product::list_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::update_availability,
        product::delete_product,
    ),
    components(schemas(
        Product,
        ProductSummary,
        ProductBody,
        ProductData,
        ProductListData,
        MessageData,
        ErrorMessage,
        ValidationErrorBody,
        FieldError,
        Location,
    )),
    tags((name = "Products", description = "API operations related to products"))
)]
pub struct ApiDoc;

pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
