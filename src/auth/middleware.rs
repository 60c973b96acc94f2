// Bearer-token extractor and role guard for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{error::AuthError, models::Role, token::TokenService};

/// Authenticated caller, extracted from `Authorization: Bearer <JWT>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Reject the caller unless their role is one of `allowed`
    pub fn require_any(&self, allowed: &'static [Role]) -> Result<(), AuthError> {
        if allowed.contains(&self.role) {
            debug!("Authorization successful: user_id={}, role={}", self.user_id, self.role);
            Ok(())
        } else {
            warn!(
                "Authorization failed: user_id={}, role={}, allowed={:?}",
                self.user_id, self.role, allowed
            );
            Err(AuthError::InsufficientPermissions {
                allowed,
                actual: self.role,
            })
        }
    }

    /// Whether the caller may act on a resource owned by `owner_id`
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id || self.role.is_staff()
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<TokenService>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).map_err(|e| {
            warn!("Rejected request to {}: {}", parts.uri.path(), e);
            e
        })?;

        let token_service = Arc::<TokenService>::from_ref(state);
        let claims = token_service.validate_access_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
