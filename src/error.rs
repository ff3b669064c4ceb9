//! Typed errors and HTTP mapping.

use crate::response::ErrorMessage;
use crate::validation::{ValidationErrorBody, ValidationErrors};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned with every 404 from an id-keyed route.
pub const NOT_FOUND_MESSAGE: &str = "Producto no encontrado";

/// Message returned when the store fails; the cause is only logged.
pub const SERVER_ERROR_MESSAGE: &str = "Hubo un error en el servidor";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Failure of a Resource Store call.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed ({} errors)", .0.len())]
    Validation(ValidationErrors),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Body could not be read at all (too large, or the stream failed).
    #[error("unreadable body: {0}")]
    Body(JsonRejection),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    errors: errors.into_inner(),
                }),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorMessage {
                    error: NOT_FOUND_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            AppError::Body(rejection) => (
                rejection.status(),
                Json(ErrorMessage {
                    error: rejection.body_text(),
                }),
            )
                .into_response(),
            AppError::Store(e) => {
                tracing::error!(error = %e, "store call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorMessage {
                        error: SERVER_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
