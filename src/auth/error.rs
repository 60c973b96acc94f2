// Authentication and authorization error types

use axum::response::{IntoResponse, Response};
use std::fmt;

use crate::auth::models::Role;
use crate::error::ApiError;

/// Authentication and authorization error types
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    // Authentication errors
    InvalidToken,
    ExpiredToken,
    MissingToken,
    TokenGenerationError(String),

    // Authorization errors
    /// Caller's role is not in the allowed set for the operation
    InsufficientPermissions {
        allowed: &'static [Role],
        actual: Role,
    },
}

fn join_roles(roles: &[Role]) -> String {
    roles.iter().map(Role::as_str).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidToken => write!(f, "Invalid token"),
            AuthError::ExpiredToken => write!(f, "Token has expired"),
            AuthError::MissingToken => write!(f, "Missing authentication token"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
            AuthError::InsufficientPermissions { allowed, actual } => write!(
                f,
                "Insufficient permissions: requires one of [{}], but user has role '{}'",
                join_roles(allowed),
                actual
            ),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::MissingToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::TokenGenerationError(msg) => ApiError::InternalError(msg),
            AuthError::InsufficientPermissions { allowed, actual } => ApiError::Forbidden(format!(
                "Role '{}' is not allowed; requires one of [{}]",
                actual,
                join_roles(allowed)
            )),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        for err in [AuthError::InvalidToken, AuthError::ExpiredToken, AuthError::MissingToken] {
            assert_eq!(ApiError::from(err).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_insufficient_permissions_maps_to_forbidden() {
        let err = AuthError::InsufficientPermissions {
            allowed: Role::ADMINS,
            actual: Role::Client,
        };
        let api = ApiError::from(err);
        assert_eq!(api.status_code(), StatusCode::FORBIDDEN);
        let (_, body) = api.to_error_response();
        assert!(body.error.contains("CLIENT"));
        assert!(body.error.contains("ADMIN, SUPER_ADMIN"));
    }

    #[test]
    fn test_generation_error_is_internal() {
        let api = ApiError::from(AuthError::TokenGenerationError("bad key".into()));
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
