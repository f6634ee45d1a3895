/// Account registration, login and identity lookup
use crypto_core::JwtKeys;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{AuthRequest, Owner};
use crate::security::password::{hash_password, verify_password};

pub struct AuthService {
    store: Arc<dyn Store>,
    keys: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, keys: Arc<JwtKeys>) -> Self {
        Self { store, keys }
    }

    fn issue_token(&self, user_id: Uuid) -> Result<String> {
        self.keys
            .issue(user_id)
            .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
    }

    /// Create an account and return an access token for it
    pub async fn register(&self, req: AuthRequest) -> Result<String> {
        if req.username.is_empty() || req.password.is_empty() {
            return Err(AppError::Validation(
                "Missing username and/or password".to_string(),
            ));
        }

        if self
            .store
            .find_user_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password(&req.password)?;
        let user = self
            .store
            .create_user(&req.username, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        self.issue_token(user.id)
    }

    /// Check credentials and return an access token
    pub async fn login(&self, req: AuthRequest) -> Result<String> {
        if req.username.is_empty() || req.password.is_empty() {
            return Err(AppError::Validation(
                "Missing username and/or password".to_string(),
            ));
        }

        let user = self
            .store
            .find_user_by_username(&req.username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(&req.password, &user.password_hash)?;

        tracing::info!(user_id = %user.id, "user logged in");
        self.issue_token(user.id)
    }

    /// Public projection of the authenticated user
    pub async fn current_user(&self, user_id: Uuid) -> Result<Owner> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.owner())
    }
}
