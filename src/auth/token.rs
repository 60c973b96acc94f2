// JWT token generation and validation service

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::models::Role;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub role: Role,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Token service for JWT operations (HS256)
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with secret key
    /// Access tokens expire in 1 hour
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_duration: 3600,
        }
    }

    pub fn generate_access_token(&self, user_id: Uuid, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            role,
            iat: now,
            exp: now + self.access_token_duration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes")
    }

    #[test]
    fn test_claims_carry_user_and_role() {
        let service = test_token_service();
        let user_id = Uuid::new_v4();
        let token = service.generate_access_token(user_id, Role::Delivery).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Delivery);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert_eq!(service.validate_access_token("").unwrap_err(), AuthError::InvalidToken);
        assert!(service.validate_access_token("not.a.token").is_err());
        assert!(service
            .validate_access_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = TokenService::new("secret1");
        let service2 = TokenService::new("secret2");

        let token = service1.generate_access_token(Uuid::new_v4(), Role::Admin).unwrap();

        assert!(service1.validate_access_token(&token).is_ok());
        assert_eq!(service2.validate_access_token(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let service = test_token_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Client,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert_eq!(service.validate_access_token(&token).unwrap_err(), AuthError::ExpiredToken);
    }

    proptest! {
        #[test]
        fn prop_random_strings_are_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.validate_access_token(&malformed).is_err());
        }
    }
}
