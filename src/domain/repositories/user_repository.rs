//! Repository trait for user account storage.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Partially updates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if a username change collides.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError>;

    /// Deletes a user account.
    ///
    /// Returns `Ok(true)` if the user was found and removed, `Ok(false)` if
    /// it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
