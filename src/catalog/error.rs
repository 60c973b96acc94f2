use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::ApiError;

/// Error types for catalog lookups and tier administration
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Article {article_id} is not available for service {service_id}")]
    IncompatibleService { article_id: Uuid, service_id: Uuid },

    #[error("No weight pricing tier covers {weight} kg")]
    NoWeightTier { weight: Decimal },

    #[error("Weight tier overlaps an existing active tier")]
    OverlappingTier,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::IncompatibleService { .. } => {
                ApiError::bad_request("INCOMPATIBLE_SERVICE", err.to_string())
            }
            CatalogError::NoWeightTier { .. } => ApiError::bad_request("NO_WEIGHT_TIER", err.to_string()),
            CatalogError::OverlappingTier => ApiError::Conflict {
                message: err.to_string(),
            },
            CatalogError::Validation(msg) => ApiError::bad_request("VALIDATION_ERROR", msg),
            CatalogError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
