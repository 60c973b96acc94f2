// Error handling module for the laundry API
// Every module error converts into ApiError, which renders the single error schema

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};
use utoipa::ToSchema;

/// Main error type for the API
/// All handlers return Result<T, ApiError>
///
/// Each variant maps to one HTTP status code. Internal variants carry detail
/// that is logged but never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    /// Field-level validation errors from the `validator` derive
    /// Maps to HTTP 400 Bad Request
    ValidationError(validator::ValidationErrors),

    /// Business rule rejection with a machine-readable code
    /// Maps to HTTP 400 Bad Request
    BadRequest { code: &'static str, message: String },

    /// Resource not found by ID
    /// Maps to HTTP 404 Not Found
    NotFound { resource: String, id: String },

    /// Conflicting state (overlapping weight tiers, insufficient points)
    /// Maps to HTTP 409 Conflict
    Conflict { message: String },

    /// Database operation errors
    /// Maps to HTTP 500 Internal Server Error
    DatabaseError(sqlx::Error),

    /// Internal server errors
    /// Maps to HTTP 500 Internal Server Error
    InternalError(String),

    /// Authentication failures
    /// Maps to HTTP 401 Unauthorized
    Unauthorized(String),

    /// Authorization failures
    /// Maps to HTTP 403 Forbidden
    Forbidden(String),
}

/// Error body returned for every failed request
///
/// `error` is always safe to show to a client. `details` is only present for
/// field-level validation failures.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Client-safe, human-readable message
    #[schema(example = "Invalid status transition from PENDING to DELIVERED")]
    pub error: String,

    /// Machine-readable error code (e.g. "VALIDATION_ERROR", "NOT_FOUND")
    #[schema(example = "INVALID_TRANSITION")]
    pub error_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    fn new(error_code: &str, error: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.to_string(),
            details,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Logging level follows severity: `error!` for 500s, `warn!` for
    /// security-relevant or integrity rejections, `debug!` for expected client
    /// mistakes.
    pub fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        let status = self.status_code();
        let body = match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                ErrorResponse::new(
                    "VALIDATION_ERROR",
                    "Request validation failed",
                    Some(serde_json::to_value(errors).unwrap_or(serde_json::json!({}))),
                )
            }
            ApiError::BadRequest { code, message } => {
                debug!("Rejected request ({}): {}", code, message);
                ErrorResponse::new(code, message.clone(), None)
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                ErrorResponse::new("NOT_FOUND", format!("{} with id {} not found", resource, id), None)
            }
            ApiError::Conflict { message } => {
                warn!("Conflict error: {}", message);
                ErrorResponse::new("CONFLICT", message.clone(), None)
            }
            ApiError::DatabaseError(db_error) => {
                // Full error stays in the logs only
                error!("Database error: {:?}", db_error);
                ErrorResponse::new("DATABASE_ERROR", "A database error occurred", None)
            }
            ApiError::InternalError(internal_msg) => {
                error!("Internal error: {}", internal_msg);
                ErrorResponse::new("INTERNAL_ERROR", "An internal server error occurred", None)
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);
                ErrorResponse::new("UNAUTHORIZED", message.clone(), None)
            }
            ApiError::Forbidden(message) => {
                warn!("Forbidden access attempt: {}", message);
                ErrorResponse::new("FORBIDDEN", message.clone(), None)
            }
        };
        (status, body)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::DatabaseError(error)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("INVALID_TRANSITION", "nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("Order", "x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Conflict { message: "overlap".into() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Unauthorized("missing".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden("role".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::InternalError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let (status, body) =
            ApiError::InternalError("connection refused to 10.0.0.3:5432".into()).to_error_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "An internal server error occurred");
        assert!(!body.success);
    }

    #[test]
    fn test_database_error_is_generic() {
        let (_, body) = ApiError::DatabaseError(sqlx::Error::RowNotFound).to_error_response();
        assert_eq!(body.error_code, "DATABASE_ERROR");
        assert_eq!(body.error, "A database error occurred");
    }

    #[test]
    fn test_error_body_uses_camel_case() {
        let (_, body) = ApiError::bad_request("INVALID_ORDER_STATE", "Order is not a draft").to_error_response();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errorCode"], "INVALID_ORDER_STATE");
        assert_eq!(json["error"], "Order is not a draft");
        assert!(json.get("details").is_none());
        assert!(json["timestamp"].is_string());
    }
}
