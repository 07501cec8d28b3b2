//! JWT token generation and validation
//!
//! Keys are derived once from the configured secret and shared behind
//! `Arc`, so cloning the service into every handler is cheap.

use super::middleware::bearer_token;
use crate::services::recommendation::IdentityResolver;
use chrono::{Duration, Utc};
use fitcoach_shared::AuthError;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub token_type: String,
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_token_expiry_secs: i64,
}

impl JwtService {
    /// Derive keys from `secret`. Call once at startup.
    pub fn new(secret: &str, access_token_expiry_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_token_expiry_secs,
        }
    }

    /// Issue an access token for a user
    pub fn generate_access_token(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry_secs)).timestamp(),
            iat: now.timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate access token: {}", e))
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?
            .claims;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Validate a token and parse the user it was issued to
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let claims = self.validate_access_token(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)
    }

    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}

impl IdentityResolver for JwtService {
    fn resolve(&self, authorization: Option<&str>) -> Result<Uuid, AuthError> {
        let token = bearer_token(authorization)?;
        self.user_id_from_token(token)
    }
}
