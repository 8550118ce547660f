//! Identity service - Consumes sessions issued by the external
//! identity provider.
//!
//! This system never issues or renews sessions; it verifies bearer
//! tokens signed by the provider and resolves them to a local user
//! row, creating the row on first sign-in. The admin flag is read
//! from storage on every request rather than trusted from the token,
//! so a stale session cannot outlive a role change.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Session token claims, as issued by the identity provider.
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// Provider-side subject identifier
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Authenticated requester resolved from a session token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// Fresh from storage for this request
    pub is_admin: bool,
}

/// Identity service trait for dependency injection.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Verify a session token and resolve the local user record.
    async fn authenticate(&self, token: &str) -> AppResult<CurrentUser>;
}

/// Concrete implementation of IdentityService.
pub struct SessionGate {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl SessionGate {
    /// Create new identity service instance
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.session_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl IdentityService for SessionGate {
    async fn authenticate(&self, token: &str) -> AppResult<CurrentUser> {
        let claims = self.verify_token(token)?;

        let existing = self
            .users
            .find_by_email(&claims.email)
            .await
            .map_err(AppError::Fetch)?;

        let user = match existing {
            Some(user) => user,
            // First sign-in: create the local record. A concurrent
            // first request can win the insert; fall back to the row
            // it created.
            None => match self.users.create(claims.email.clone(), claims.name.clone()).await {
                Ok(user) => {
                    tracing::info!(email = %user.email, "Created user on first sign-in");
                    user
                }
                Err(e)
                    if matches!(
                        e.sql_err(),
                        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                    ) =>
                {
                    self.users
                        .find_by_email(&claims.email)
                        .await
                        .map_err(AppError::Fetch)?
                        .ok_or(AppError::Unauthorized)?
                }
                Err(e) => return Err(AppError::Fetch(e)),
            },
        };

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
            name: user.name,
            is_admin: user.is_admin,
        })
    }
}
