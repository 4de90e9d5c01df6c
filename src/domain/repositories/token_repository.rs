//! Repository trait for API token authentication.

use crate::domain::entities::Principal;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// API token entity with metadata.
///
/// Tokens are stored as keyed HMAC-SHA256 hashes; the raw token is shown once
/// at issue time and never persisted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiToken {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Repository interface for API token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to the principal it belongs to.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Principal))` if the token exists, is not revoked, and its
    ///   owning user account is active
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_principal_by_hash(&self, token_hash: &str)
    -> Result<Option<Principal>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    ///
    /// Called after successful authentication for monitoring and audit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Creates a new API token for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a token with the same hash exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError>;

    /// Lists all tokens in the system.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    /// Revokes a token, preventing further authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke_token(&self, id: i64) -> Result<(), AppError>;
}
