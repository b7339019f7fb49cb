//! User model and bearer credential claims

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::Role;
use crate::error::AppError;

/// User record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar_url: Option<String>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserClaims {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Claims for `user` shown under `name`, valid for `hours` from now
    pub fn new(user: &User, name: String, hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            name,
            exp: now + (hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token, checking signature and expiry
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Fails unless the role is in `allowed`. An empty list admits everyone.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.is_empty() || allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Role '{}' is not permitted for this action",
                self.role
            )))
        }
    }
}
