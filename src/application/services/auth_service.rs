//! Bearer token authentication producing a request [`Principal`].

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::Principal;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Service authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison. An attacker with read-only access to the database
/// cannot verify or forge tokens without the server-side secret.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were issued
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC. Public so the admin
    /// CLI can hash tokens it issues with the same scheme.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Authenticates a raw token and returns the owning principal.
    ///
    /// On success, updates the token's `last_used_at` timestamp for
    /// monitoring and audit purposes; failure to record it does not fail the
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, revoked,
    /// or belongs to a deactivated user.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let token_hash = self.hash_token(token);

        let principal = self
            .repository
            .find_principal_by_hash(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or revoked token"}),
                )
            })?;

        let _ = self.repository.touch_last_used(&token_hash).await;

        Ok(principal)
    }
}
