use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    response::ApiResponse,
    store::{Collection, StoreError},
    validation::{FieldViolation, ValidationErrors},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid {collection} id: {id}")]
    InvalidIdentifier { collection: Collection, id: String },

    #[error("Product not found: {id}")]
    ProductNotFound { id: String },

    #[error("Order not found: {id}")]
    OrderNotFound { id: String },

    #[error("No items in order")]
    EmptyOrder,

    #[error("Insufficient stock for {title}")]
    InsufficientStock { title: String },

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Internal Server Error")]
    Persistence(#[from] StoreError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidIdentifier { .. } => "invalid_identifier",
            AppError::ProductNotFound { .. } => "product_not_found",
            AppError::OrderNotFound { .. } => "order_not_found",
            AppError::EmptyOrder => "empty_order",
            AppError::InsufficientStock { .. } => "insufficient_stock",
            AppError::Validation(_) => "validation",
            AppError::Persistence(_) => "persistence",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidIdentifier { .. }
            | AppError::EmptyOrder
            | AppError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            AppError::ProductNotFound { .. } | AppError::OrderNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorData {
    pub kind: String,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let violations = match &self {
            AppError::Validation(errors) => errors.violations().to_vec(),
            AppError::Persistence(err) => {
                // detail stays in the logs
                tracing::error!(error = %err, "store operation failed");
                Vec::new()
            }
            _ => Vec::new(),
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                kind: self.kind().to_string(),
                error: self.to_string(),
                violations,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
