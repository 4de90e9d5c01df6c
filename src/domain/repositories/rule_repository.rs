//! Repository trait for redirect rule storage.

use crate::domain::entities::{NewRule, RedirectRule, RulePatch};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for redirect rules.
///
/// The store is the single authority on identifier uniqueness: `create` must
/// be atomic with respect to the unique constraint so two concurrent creates
/// can never both succeed with the same identifier.
///
/// Resolution lookups are deliberately scoped (`is_private` and, for the
/// private path, `owner_id` live in the query itself). A lookup that fails
/// the scope is indistinguishable from one that matches nothing, so callers
/// cannot leak the existence of rules they are not allowed to see.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRuleRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Persists a new rule.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the identifier collides with an
    /// existing rule; the caller regenerates and retries.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_rule: NewRule) -> Result<RedirectRule, AppError>;

    /// Finds a rule by its internal id, regardless of visibility.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RedirectRule>, AppError>;

    /// Finds a public rule by identifier.
    ///
    /// Scoped to `is_private = false`; a private rule with this identifier
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_public_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<RedirectRule>, AppError>;

    /// Finds a private rule by identifier, owned by `owner_id`.
    ///
    /// Scoped to `is_private = true AND owner_id = $owner_id`; a public rule
    /// or another owner's rule yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_private_by_identifier(
        &self,
        identifier: &str,
        owner_id: i64,
    ) -> Result<Option<RedirectRule>, AppError>;

    /// Lists all rules owned by `owner_id`, newest-created first.
    ///
    /// Creation-timestamp ties are broken by `id` descending so the order is
    /// stable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<RedirectRule>, AppError>;

    /// Partially updates a rule and bumps its `modified` timestamp.
    ///
    /// Only fields present in [`RulePatch`] are modified; identifier, owner,
    /// and `created` never change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no rule matches `id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: Uuid, patch: RulePatch) -> Result<RedirectRule, AppError>;

    /// Deletes a rule.
    ///
    /// Returns `Ok(true)` if the rule was found and removed, `Ok(false)` if
    /// it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
