use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::error::ApiError;
use crate::orders::OrderError;

/// Error types for manual pricing overrides
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Order not found")]
    OrderNotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::OrderNotFound(id) => ApiError::not_found("Order", id),
            PricingError::Validation(msg) => ApiError::bad_request("VALIDATION_ERROR", msg),
            PricingError::Order(e) => e.into(),
            PricingError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
