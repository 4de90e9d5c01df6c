//! Admin-gated user account management.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Principal, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Allowed username length range.
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 150;

/// Minimum password length.
const PASSWORD_MIN: usize = 8;

/// Hashes a password with HMAC-SHA256 keyed by the server signing secret.
///
/// Shared with the admin CLI so accounts created out-of-band authenticate
/// identically.
pub fn hash_password(signing_secret: &str, password: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for administrative user management.
///
/// Every operation requires an admin principal; regular users never reach
/// this surface. Rule ownership is untouched by user administration — an
/// admin managing accounts gains no access to anyone's redirect rules.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    signing_secret: String,
}

/// Partial user update accepted from the API.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if `principal` is not an admin.
    /// Returns [`AppError::Validation`] for a bad username or password.
    /// Returns [`AppError::Conflict`] if the username is taken.
    pub async fn create_user(
        &self,
        principal: &Principal,
        username: String,
        password: String,
    ) -> Result<User, AppError> {
        self.require_admin(principal)?;
        validate_username(&username)?;
        validate_password(&password)?;

        self.repository
            .create(NewUser {
                username,
                password_hash: hash_password(&self.signing_secret, &password),
                is_admin: false,
            })
            .await
    }

    /// Applies a partial update to a user account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if `principal` is not an admin.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Validation`] for a bad username or password.
    pub async fn update_user(
        &self,
        principal: &Principal,
        id: i64,
        update: UserUpdate,
    ) -> Result<User, AppError> {
        self.require_admin(principal)?;

        if let Some(username) = &update.username {
            validate_username(username)?;
        }
        if let Some(password) = &update.password {
            validate_password(password)?;
        }

        let patch = UserPatch {
            username: update.username,
            password_hash: update
                .password
                .map(|p| hash_password(&self.signing_secret, &p)),
            is_active: update.is_active,
        };

        self.repository.update(id, patch).await
    }

    /// Deletes a user account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if `principal` is not an admin.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn delete_user(&self, principal: &Principal, id: i64) -> Result<(), AppError> {
        self.require_admin(principal)?;

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }

        Ok(())
    }

    fn require_admin(&self, principal: &Principal) -> Result<(), AppError> {
        if !principal.is_admin {
            return Err(AppError::forbidden(
                "Administrator privileges required",
                json!({}),
            ));
        }
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), AppError> {
    if username.len() < USERNAME_MIN || username.len() > USERNAME_MAX {
        return Err(AppError::bad_request(
            "Username must be 3-150 characters",
            json!({ "field": "username", "provided_length": username.len() }),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(AppError::bad_request(
            "Username can only contain letters, digits, '_', '-', and '.'",
            json!({ "field": "username" }),
        ));
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < PASSWORD_MIN {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters",
            json!({ "field": "password" }),
        ));
    }
    Ok(())
}
